use std::io::{self, Write};
use std::path::Path;

use crate::config_file::Config;
use crate::theme::{self, Palette};

/// Print usage, every configured entry in declaration order, and where the config lives.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn render_help(
    config: &Config,
    config_path: &Path,
    palette: Palette,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "{}", palette.paint(theme::HEADING, "Usage:"))?;
    writeln!(out, " • march <args> (e.g. `-uo` OR `upgrade,orphans`)")?;
    writeln!(out)?;
    writeln!(out, "{}", palette.paint(theme::HEADING, "Available commands:"))?;
    for entry in &config.entries {
        writeln!(
            out,
            " • {}, -{} {}",
            palette.paint(theme::ACCENT, &entry.name),
            entry.short,
            palette.paint(theme::DIM, &format!("({})", entry.command))
        )?;
    }
    writeln!(out)?;
    writeln!(out, "* Commands are configured in")?;
    writeln!(out, "{}", config_path.display())?;
    Ok(())
}
