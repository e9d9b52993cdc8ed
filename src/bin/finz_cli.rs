use finz::{cli::run_cli, init};

fn main() {
    init();

    if let Err(err) = run_cli() {
        finz::cli::output::error(&err);
        std::process::exit(1);
    }
}
