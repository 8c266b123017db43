//! Writes `sample_trace.csv`: interleaved `A` (sensor) and `B` (event) rows,
//! field 1 a hex millisecond timestamp, decimal readings after it.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xorshift64*)
struct SimpleRng(u64);

impl SimpleRng {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        let v = self.0.wrapping_mul(0x2545_F491_4F6C_DD1D);
        (v >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng(42);
    let output_path = "sample_trace.csv";
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    // Timestamps start well above zero so rebasing has something to do.
    let start_ms: u64 = 0x5f3a_0000;
    let mut rows = 0;
    for i in 0..500u64 {
        let t = start_ms + i * 20 + (rng.next_f64() * 5.0) as u64;
        let phase = i as f64 / 50.0;
        let temp = 20.0 + 5.0 * phase.sin() + rng.next_f64() - 0.5;
        let load = 0.5 + 0.4 * (phase * 0.3).cos();

        writer.write_record([
            "A".to_string(),
            format!("{t:x}"),
            format!("{temp:.3}"),
            format!("{load:.3}"),
        ])?;
        rows += 1;

        if i % 25 == 0 {
            writer.write_record(["B".to_string(), format!("{t:x}"), format!("event-{i}")])?;
            rows += 1;
        }
    }
    writer.flush().context("flushing sample")?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
