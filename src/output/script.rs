//! Shell script generation for a deletion plan.
//!
//! Exports the plan as a script for manual review and execution instead of
//! letting the tool delete anything itself.
//!
//! # Features
//!
//! * **Multi-platform**: POSIX shell scripts (Unix) and PowerShell (Windows).
//! * **Safety-first**: Scripts default to dry-run mode and require a `--confirm` flag.
//! * **Robust Escaping**: Handles spaces, quotes, and special characters in file paths.
//! * **Informative**: Comments show each group's hash and the copy that is kept.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use crate::duplicates::{FinderResult, HashGroup, Origin};

/// Type of script to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptType {
    /// POSIX-compliant shell script (sh/bash/zsh)
    Posix,
    /// Windows PowerShell script
    #[value(name = "powershell")]
    PowerShell,
}

impl ScriptType {
    /// Detect the appropriate script type for the current platform.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(windows) {
            Self::PowerShell
        } else {
            Self::Posix
        }
    }
}

/// Formatter for shell script output.
pub struct ScriptOutput<'a> {
    /// Planning result to render
    pub result: &'a FinderResult,
    /// The type of script to generate
    pub script_type: ScriptType,
}

impl<'a> ScriptOutput<'a> {
    /// Create a new script output formatter.
    #[must_use]
    pub fn new(result: &'a FinderResult, script_type: ScriptType) -> Self {
        Self {
            result,
            script_type,
        }
    }

    /// Write the generated script to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        match self.script_type {
            ScriptType::Posix => self.write_posix(writer),
            ScriptType::PowerShell => self.write_powershell(writer),
        }
    }

    fn write_header<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# bagdupe deletion script")?;
        writeln!(
            writer,
            "# Generated on: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(writer, "# Bag: {}", self.result.bag.root().display())?;
        writeln!(
            writer,
            "# Manifest: {}",
            self.result.summary.manifest.display()
        )?;
        if let Some((remote, _)) = &self.result.summary.remote {
            writeln!(writer, "# Remote manifest: {}", remote.display())?;
        }
        writeln!(writer, "#")?;
        writeln!(
            writer,
            "# WARNING: This script will PERMANENTLY DELETE files."
        )?;
        writeln!(
            writer,
            "# Planned deletions: {}",
            self.result.summary.duplicate_files
        )?;
        writeln!(writer)
    }

    fn write_group_comment<W: Write>(
        &self,
        writer: &mut W,
        index: usize,
        group: &HashGroup,
    ) -> std::io::Result<()> {
        writeln!(writer, "# Group {}: Hash {}", index + 1, group.hash)?;
        if let Some(canonical) = group.canonical() {
            let origin = match canonical.origin {
                Origin::Local => "",
                Origin::Remote => " (remote)",
            };
            writeln!(writer, "# KEEP:   {}{}", canonical.path, origin)?;
        }
        Ok(())
    }

    fn write_posix<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "#!/bin/sh")?;
        self.write_header(writer)?;

        writeln!(writer, "DRY_RUN=1")?;
        writeln!(writer, "if [ \"$1\" = \"--confirm\" ]; then")?;
        writeln!(writer, "    DRY_RUN=0")?;
        writeln!(writer, "fi")?;
        writeln!(writer, "set -e")?;
        writeln!(writer)?;

        for (i, group) in self.result.groups.with_duplicates().enumerate() {
            self.write_group_comment(writer, i, group)?;
            for member in group.duplicates() {
                let target = escape_posix(&self.result.bag.resolve(&member.path));
                writeln!(writer, "if [ \"$DRY_RUN\" -eq 0 ]; then")?;
                writeln!(writer, "    rm -- {}", target)?;
                writeln!(writer, "else")?;
                writeln!(writer, "    echo \"would delete: \"{}", target)?;
                writeln!(writer, "fi")?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "if [ \"$DRY_RUN\" -eq 1 ]; then")?;
        writeln!(
            writer,
            "    echo \"Dry run complete. Run with --confirm to delete files.\""
        )?;
        writeln!(writer, "fi")?;
        Ok(())
    }

    fn write_powershell<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.write_header(writer)?;

        writeln!(writer, "$DryRun = $true")?;
        writeln!(writer, "if ($args[0] -eq \"--confirm\") {{")?;
        writeln!(writer, "    $DryRun = $false")?;
        writeln!(writer, "}}")?;
        writeln!(writer, "$ErrorActionPreference = \"Stop\"")?;
        writeln!(writer)?;

        for (i, group) in self.result.groups.with_duplicates().enumerate() {
            self.write_group_comment(writer, i, group)?;
            for member in group.duplicates() {
                let target = escape_powershell(&self.result.bag.resolve(&member.path));
                writeln!(writer, "if (-not $DryRun) {{")?;
                writeln!(writer, "    Remove-Item -LiteralPath {}", target)?;
                writeln!(writer, "}} else {{")?;
                writeln!(writer, "    Write-Host (\"would delete: \" + {})", target)?;
                writeln!(writer, "}}")?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "if ($DryRun) {{")?;
        writeln!(
            writer,
            "    Write-Host \"Dry run complete. Run with --confirm to delete files.\""
        )?;
        writeln!(writer, "}}")?;
        Ok(())
    }
}

fn escape_posix(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Wrap in single quotes, escape single quotes as '\''
    format!("'{}'", s.replace('\'', "'\\''"))
}

fn escape_powershell(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Wrap in single quotes, escape single quotes as ''
    format!("'{}'", s.replace('\'', "''"))
}
