//! Capture one window's pixels to a PNG file.

use clap::Parser;

#[derive(Parser)]
#[command(name = "gwc-capture", about = "Capture a window's visible contents as PNG")]
struct Args {
    /// Exact title of the window to capture; omit for the active window.
    #[arg(short, long)]
    title: Option<String>,

    /// Output file path.
    #[arg(short, long, default_value = "capture.png")]
    output: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("gwc-capture: {e}");
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn run(args: &Args) -> gwc_core::Result<()> {
    let session = gwc_core::Session::connect()?;
    let window = match &args.title {
        Some(title) => session.find_window(title)?,
        None => session.active_window()?,
    };

    let frame = window.capture()?;
    let png = frame.to_png()?;
    std::fs::write(&args.output, &png)
        .map_err(|e| gwc_core::GwcError::os_call("write png", e))?;
    println!(
        "captured {}x{} ({} bytes) to {}",
        frame.width(),
        frame.height(),
        png.len(),
        args.output
    );
    Ok(())
}

#[cfg(not(windows))]
fn run(_args: &Args) -> gwc_core::Result<()> {
    eprintln!("gwc-capture: the native Win32 backend is not available on this OS");
    std::process::exit(1);
}
