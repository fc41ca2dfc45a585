fn main() -> Result<(), Box<dyn std::error::Error>> {
    termblog::cli::main()
}
