//! List every enumerable top-level window as JSON.

use clap::Parser;

#[derive(Parser)]
#[command(name = "gwc-windows", about = "List top-level windows (id, title, class, pid, rect)")]
struct Args {
    /// Only show windows whose title contains this substring.
    #[arg(short, long)]
    filter: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("gwc-windows: {e}");
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn run(args: &Args) -> gwc_core::Result<()> {
    let session = gwc_core::Session::connect()?;
    let mut infos = session.list_windows()?;
    log::debug!("enumerated {} windows", infos.len());
    if let Some(filter) = &args.filter {
        infos.retain(|info| info.title.contains(filter.as_str()));
    }
    let json = serde_json::to_string_pretty(&infos)
        .map_err(|e| gwc_core::GwcError::os_call("serialize window list", e))?;
    println!("{json}");
    Ok(())
}

#[cfg(not(windows))]
fn run(_args: &Args) -> gwc_core::Result<()> {
    eprintln!("gwc-windows: the native Win32 backend is not available on this OS");
    std::process::exit(1);
}
