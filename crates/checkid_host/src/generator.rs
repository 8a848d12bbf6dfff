//! Identifier generator for batch files and benchmarks.
//!
//! Issues identifiers from uniformly random payloads and, when asked, damages
//! them the way a careless reader would: by substituting symbols. The output
//! feeds `run` for batch checking and the same damage model drives `bench`.

use anyhow::{Result, bail};
use checkid_core::{Identifier, Symbol, encode, random_payload};
use checkid_io::loader;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Seeded generator when `seed` is given, entropy-seeded otherwise.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Issues one identifier of length `len` from a random payload.
pub fn issue<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<Identifier> {
    let payload = random_payload(len, rng)?;
    Ok(encode(len, &payload)?)
}

/// Replaces the symbol at each of `count` distinct positions with a different one.
pub fn substitute_distinct<R: Rng + ?Sized>(
    id: &Identifier,
    count: usize,
    rng: &mut R,
) -> Identifier {
    let count = count.min(id.len());
    let mut symbols = id.symbols().to_vec();
    for position in index::sample(rng, id.len(), count) {
        symbols[position] = shifted(symbols[position], rng);
    }
    Identifier::new(symbols)
}

/// Replaces each symbol with a different one with probability `p`.
pub fn substitute_with_rate<R: Rng + ?Sized>(id: &Identifier, p: f64, rng: &mut R) -> Identifier {
    let symbols = id
        .symbols()
        .iter()
        .map(|&s| if rng.gen_bool(p) { shifted(s, rng) } else { s })
        .collect();
    Identifier::new(symbols)
}

fn shifted<R: Rng + ?Sized>(symbol: Symbol, rng: &mut R) -> Symbol {
    Symbol::wrapping(symbol.value() + rng.gen_range(1..32))
}

/// Generates an identifier batch file.
///
/// # Arguments
///
/// * `out_path` - Output path for the batch file
/// * `len` - Identifier length
/// * `count` - Number of identifiers to issue
/// * `seed` - Fixed seed for reproducible batches
/// * `grouped` - Write identifiers in dash-grouped display form
/// * `noise` - Per-symbol substitution probability applied after issuing
///
/// # Returns
///
/// Ok(()) on success, or an error if the arguments are out of range or file
/// I/O fails.
pub fn generate_ids(
    out_path: &str,
    len: usize,
    count: usize,
    seed: Option<u64>,
    grouped: bool,
    noise: f64,
) -> Result<()> {
    if !(0.0..=1.0).contains(&noise) {
        bail!("noise must be a probability in [0, 1], got {}", noise);
    }

    println!("Generating {} identifiers of length {}...", count, len);
    if noise > 0.0 {
        println!("WARNING: Substituting symbols with probability {}.", noise);
    }

    let mut rng = rng_from(seed);
    let mut ids = Vec::with_capacity(count);
    let mut damaged = 0usize;
    for _ in 0..count {
        let issued = issue(len, &mut rng)?;
        let written = if noise > 0.0 {
            substitute_with_rate(&issued, noise, &mut rng)
        } else {
            issued.clone()
        };
        if written != issued {
            damaged += 1;
        }
        ids.push(written);
    }
    debug!(damaged, "applied substitutions");

    loader::write_id_file(out_path, &ids, grouped)?;
    info!(path = out_path, count, damaged, "identifier batch written");

    println!("Done. {} of {} identifiers damaged.", damaged, count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkid_core::verify;

    #[test]
    fn test_issued_identifiers_verify() {
        let mut rng = rng_from(Some(3));
        for len in [8, 16, 32] {
            let id = issue(len, &mut rng).unwrap();
            assert_eq!(id.len(), len);
            assert!(verify(&id).unwrap());
        }
        assert!(issue(1, &mut rng).is_err());
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = issue(16, &mut rng_from(Some(99))).unwrap();
        let b = issue(16, &mut rng_from(Some(99))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_substitute_distinct_changes_exactly_count() {
        let mut rng = rng_from(Some(5));
        let id = issue(16, &mut rng).unwrap();
        for count in 0..=4 {
            let damaged = substitute_distinct(&id, count, &mut rng);
            assert_eq!(damaged.distance(&id), count);
        }
        assert_eq!(substitute_distinct(&id, 100, &mut rng).distance(&id), 16);
    }

    #[test]
    fn test_substitute_with_rate_extremes() {
        let mut rng = rng_from(Some(8));
        let id = issue(20, &mut rng).unwrap();
        assert_eq!(substitute_with_rate(&id, 0.0, &mut rng), id);
        assert_eq!(substitute_with_rate(&id, 1.0, &mut rng).distance(&id), 20);
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen.txt");
        let path = path.to_str().unwrap();
        generate_ids(path, 12, 25, Some(1), true, 0.0).unwrap();

        let records = loader::load_id_file(path).unwrap();
        assert_eq!(records.len(), 25);
        for r in &records {
            assert!(verify(r.identifier().unwrap()).unwrap());
        }

        assert!(generate_ids(path, 12, 1, Some(1), false, 1.5).is_err());
    }
}
