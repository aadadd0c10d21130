use std::io;

fn main() -> anyhow::Result<()> {
    tabia::print_engine_info();
    let stdin = io::stdin();
    let stdout = io::stdout();
    tabia::console::run(&mut stdin.lock(), &mut stdout.lock())
}
