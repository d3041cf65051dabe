fn main() {
    let res = pstree::app::run();
    if let Err(err) = res {
        eprintln!("pstree: {err:#}");
        std::process::exit(1);
    }
}
