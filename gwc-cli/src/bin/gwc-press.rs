//! Send one allow-listed key press to a window, refocusing it if needed.

use clap::Parser;

#[derive(Parser)]
#[command(name = "gwc-press", about = "Press a key in a window (z/x/up/down/left/right/enter)")]
struct Args {
    /// Exact title of the target window.
    #[arg(short, long)]
    title: String,

    /// Key name, matched case-insensitively against the allow-list.
    #[arg(short, long)]
    key: String,

    /// Number of presses to deliver.
    #[arg(short = 'n', long, default_value = "1")]
    count: u32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("gwc-press: {e}");
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn run(args: &Args) -> gwc_core::Result<()> {
    let key: gwc_core::Key = args.key.parse()?;
    let session = gwc_core::Session::connect()?;
    let window = session.find_window(&args.title)?;

    for _ in 0..args.count {
        window.press(key)?;
    }
    println!("pressed '{key}' x{} in '{}'", args.count, args.title);
    Ok(())
}

#[cfg(not(windows))]
fn run(_args: &Args) -> gwc_core::Result<()> {
    eprintln!("gwc-press: the native Win32 backend is not available on this OS");
    std::process::exit(1);
}
