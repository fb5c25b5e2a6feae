fn main() {
    if let Err(err) = mermaid_docs::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
