//! `sunboard errors`: browse the error catalog.

use crate::ui::OutputContext;
use anyhow::{Result, bail};
use sunboard_common::ErrorCode;

pub fn run(code: Option<&str>, ctx: &OutputContext) -> Result<()> {
    let Some(code) = code else {
        let entries: Vec<_> = ErrorCode::all().iter().map(ErrorCode::entry).collect();
        if ctx.is_json() {
            return ctx.json(&entries);
        }
        for entry in entries {
            println!(
                "{}  {:<14} {}",
                ctx.theme().highlight(&entry.code),
                entry.category.name(),
                entry.message
            );
        }
        return Ok(());
    };

    let Some(found) = lookup(code) else {
        bail!("unknown error code '{code}'");
    };
    let entry = found.entry();
    if ctx.is_json() {
        return ctx.json(&entry);
    }
    println!("{}", entry.format_full().trim_end());
    Ok(())
}

/// Accepts `SB-E301`, `E301` or `301`.
fn lookup(code: &str) -> Option<ErrorCode> {
    let upper = code.trim().to_ascii_uppercase();
    let digits = upper
        .strip_prefix("SB-")
        .unwrap_or(&upper)
        .trim_start_matches('E');
    let number: u16 = digits.parse().ok()?;
    ErrorCode::all()
        .iter()
        .copied()
        .find(|c| c.code_number() == number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_accepts_common_spellings() {
        assert_eq!(lookup("SB-E301"), Some(ErrorCode::TabNotOffered));
        assert_eq!(lookup("e301"), Some(ErrorCode::TabNotOffered));
        assert_eq!(lookup("1"), Some(ErrorCode::ConfigNotFound));
        assert_eq!(lookup("SB-E999"), None);
        assert_eq!(lookup("tabs"), None);
    }
}
