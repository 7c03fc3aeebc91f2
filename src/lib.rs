//! # POW4TH
//!
//! A small Forth machine in the Nga tradition: thirty primitive
//! instructions packed four to a 32-bit cell, a flat cell memory that
//! holds code, data and the dictionary alike, and a resident `interpret`
//! word that an operator talks to one token at a time.
//!
//! Begin by placing a memory image at `.firmware/ngaImage` and running
//! the executable. Type words at the prompt; `bye` leaves.
//! ```text
//! POW4TH> 1 2 + .
//! 3
//! POW4TH> bye
//! ```
//!
//! Images can also be assembled from fenced source. Point
//! `POW4TH_SOURCE` at a file whose code sits between `~~~` lines; with no
//! image loaded it is assembled, otherwise its tokens are interpreted by
//! the loaded image.
//!
//! Settings come from the environment: `POW4TH_IMAGE`, `POW4TH_SOURCE`,
//! `POW4TH_MEMORY`, `POW4TH_CEILING` and `POW4TH_LOG`.

pub mod lang;
pub mod mach;
pub mod term;
