//! `resolve` command: print base-prefixed paths, one per line.

use std::io::{self, Write};

use anyhow::Result;

use crate::address::PathResolver;
use crate::cli::ResolveArgs;
use crate::config::SiteConfig;
use crate::debug;

pub fn run_resolve(args: &ResolveArgs, config: &SiteConfig) -> Result<()> {
    let resolver = config.resolver();
    debug!("resolve"; "base prefix: {}", resolver.base());

    let stdout = io::stdout();
    write_resolved(&resolver, &args.paths, &mut stdout.lock())
}

fn write_resolved(resolver: &PathResolver, paths: &[String], out: &mut impl Write) -> Result<()> {
    for path in paths {
        writeln!(out, "{}", resolver.resolve(path).as_str())?;
    }
    Ok(())
}
