//! Process-lifetime statistics over all completed connections.

use std::io::{self, Write};

use pcc_core::Histogram;

/// Owns the lifetime histogram. Committed to exactly once per fully
/// completed exchange; aborted connections contribute nothing, so the
/// totals never include a partially transferred payload.
#[derive(Debug, Default)]
pub struct GlobalStats {
    totals: Histogram,
    connections_completed: u64,
}

impl GlobalStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one connection's delta into the lifetime totals.
    pub fn commit(&mut self, delta: &Histogram) {
        self.totals.merge(delta);
        self.connections_completed += 1;
    }

    /// Number of connections that completed the full exchange.
    pub fn connections_completed(&self) -> u64 {
        self.connections_completed
    }

    /// The lifetime histogram.
    pub fn histogram(&self) -> &Histogram {
        &self.totals
    }

    /// Writes the shutdown report: one line per printable byte value in
    /// ascending order, `char '<c>' : <count> times`.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (ch, count) in self.totals.iter() {
            writeln!(out, "char '{ch}' : {count} times")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
