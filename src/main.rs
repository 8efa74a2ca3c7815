fn main() {
    if let Err(error) = stackview::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
