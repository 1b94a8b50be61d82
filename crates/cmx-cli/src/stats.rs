//! # Stats Subcommand
//!
//! Register status counts and deadline buckets.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

use cmx_store::{CmxConfig, RegisterOverview};

use crate::{open_store, EXIT_OK};

/// Arguments for the `cmx stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Reference date as YYYY-MM-DD. Defaults to today in local time.
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Due-soon window in days. Overrides the configured value.
    #[arg(long)]
    pub window: Option<i64>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Compute the register overview for the given arguments.
pub fn overview(args: &StatsArgs, config: &CmxConfig) -> Result<RegisterOverview> {
    let store = open_store(config)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let window = args.window.unwrap_or(config.due_soon_days);
    Ok(store.register_overview(today, window))
}

/// Execute the stats subcommand.
pub fn run_stats(args: &StatsArgs, config: &CmxConfig) -> Result<u8> {
    let overview = overview(args, config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(EXIT_OK);
    }

    let s = &overview.status;
    let d = &overview.deadlines;
    println!("Register entries: {}", s.total);
    println!("  open:      {}", s.open);
    println!("  active:    {}", s.active);
    println!("  obsolete:  {}", s.obsolete);
    println!("  archived:  {}", s.archived);
    println!("  no status: {}", s.no_status);
    println!("Deadlines: {}", d.with_deadline);
    println!("  due soon:  {}", d.due_soon);
    println!("  overdue:   {}", d.overdue);
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmx_core::{RegisterEntry, RegisterStatus};

    #[test]
    fn overview_reads_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = CmxConfig {
            data_dir: dir.path().to_path_buf(),
            ..CmxConfig::default()
        };
        let mut store = open_store(&config).unwrap();
        let mut e = RegisterEntry::new();
        e.code = Some("DORA".into());
        e.status = Some(RegisterStatus::Active);
        e.due_date = Some("2025-01-17".into());
        store.create_register_entry(e).unwrap();
        store.save().unwrap();

        let args = StatsArgs {
            today: NaiveDate::from_ymd_opt(2025, 2, 1),
            window: None,
            json: true,
        };
        let o = overview(&args, &config).unwrap();
        assert_eq!(o.status.active, 1);
        assert_eq!(o.deadlines.overdue, 1);
        assert_eq!(run_stats(&args, &config).unwrap(), EXIT_OK);
    }

    #[test]
    fn empty_data_dir_is_all_zero() {
        let dir = tempfile::tempdir().unwrap();
        let config = CmxConfig {
            data_dir: dir.path().join("fresh"),
            ..CmxConfig::default()
        };
        let args = StatsArgs {
            today: None,
            window: Some(7),
            json: false,
        };
        assert_eq!(overview(&args, &config).unwrap().status.total, 0);
    }

    #[test]
    fn default_today_is_local_date() {
        let dir = tempfile::tempdir().unwrap();
        let config = CmxConfig {
            data_dir: dir.path().to_path_buf(),
            ..CmxConfig::default()
        };
        let mut store = open_store(&config).unwrap();
        let mut e = RegisterEntry::new();
        e.due_date = Some(Local::now().date_naive().format("%Y-%m-%d").to_string());
        store.create_register_entry(e).unwrap();
        store.save().unwrap();

        let args = StatsArgs {
            today: None,
            window: Some(0),
            json: false,
        };
        let d = overview(&args, &config).unwrap().deadlines;
        assert_eq!(d.overdue, 0);
        assert_eq!(d.due_soon, 1);
    }
}
