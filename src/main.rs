fn main() {
    pow4th::term::main()
}
