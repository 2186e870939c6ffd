fn main() {
    if let Err(err) = edgeviz::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
