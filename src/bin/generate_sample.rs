use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

/// SplitMix64: tiny, deterministic, good enough for fake solver noise.
struct NoiseSource {
    state: u64,
}

impl NoiseSource {
    /// Seed from the file's parameters so each file is reproducible on its own.
    fn for_file(instance: &str, zones: u32, alpha: f64) -> Self {
        let mut seed = 0xcbf2_9ce4_8422_2325u64;
        for byte in instance.bytes().chain(zones.to_le_bytes()).chain(alpha.to_bits().to_le_bytes()) {
            seed = (seed ^ byte as u64).wrapping_mul(0x0100_0000_01b3);
        }
        NoiseSource { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in (0, 1].
    fn unit(&mut self) -> f64 {
        ((self.next_u64() >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    /// Standard normal draw (Box-Muller, cosine branch).
    fn normal(&mut self) -> f64 {
        let r = (-2.0 * self.unit().ln()).sqrt();
        r * (std::f64::consts::TAU * self.unit()).cos()
    }
}

/// One synthetic solver run: (cost without treatment, cost with, seconds).
///
/// Total variance falls as zones are added and the treatment removes a
/// share proportional to alpha. Runtime is log-normal around a value that
/// grows with zones and alpha.
fn simulate_run(base: f64, zones: u32, alpha: f64, noise: &mut NoiseSource) -> (f64, f64, f64) {
    let p = zones as f64;
    let without = (base / p.sqrt() * (1.0 + 0.02 * noise.normal())).max(0.0);
    let with = (without * (1.0 - 0.3 * alpha) * (1.0 + 0.01 * noise.normal())).max(0.0);
    let time = 0.05 * p * p * (1.0 + alpha) * (0.1 * noise.normal()).exp();
    (without, with, time)
}

fn main() -> Result<()> {
    let instances = [("mediana_1.spp", 180.0), ("mediana_2.spp", 240.0), ("mediana_3.spp", 310.0)];
    let zones = [2u32, 4, 6, 8, 10];
    let alphas = [0.1, 0.3, 0.5, 0.7];
    let runs = 10;

    let out_dir = Path::new("test_results").join("resultados_Medianas");
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut written = 0usize;
    for &(instance, base) in &instances {
        for &p in &zones {
            for &alpha in &alphas {
                let mut noise = NoiseSource::for_file(instance, p, alpha);

                // First line is the run count, as the solver writes it.
                let mut body = format!("{runs}\n");
                for _ in 0..runs {
                    let (without, with, time) = simulate_run(base, p, alpha, &mut noise);
                    writeln!(body, "{without:.4} {with:.4} {time:.4}")?;
                }

                let path = out_dir.join(format!("{instance}_z{p}_a{alpha}.txt"));
                std::fs::write(&path, body)
                    .with_context(|| format!("writing {}", path.display()))?;
                written += 1;
            }
        }
    }

    println!(
        "Wrote {written} result files ({runs} runs each) to {}",
        out_dir.display()
    );
    Ok(())
}
