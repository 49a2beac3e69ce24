fn main() {
    if let Err(err) = focus_stats_lib::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
