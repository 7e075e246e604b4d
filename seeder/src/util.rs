use std::collections::HashSet;

use rand::distr::Alphanumeric;
use rand::{Rng, rng};

/// Generate a unique set of items using a closure
///
/// Every item gets a random suffix, values in `taken` are never produced
pub fn generate_unique_set<F>(
	count: usize,
	taken: &HashSet<String>,
	mut f: F,
) -> Vec<String>
where
	F: FnMut() -> String,
{
	let mut set = HashSet::with_capacity(count);
	let mut rng = rng();

	while set.len() < count {
		let mut value = f();
		value.push('_');
		value.extend((0..6).map(|_| rng.sample(Alphanumeric) as char));

		let value = value.to_lowercase();
		if !taken.contains(&value) {
			set.insert(value);
		}
	}

	set.into_iter().collect()
}
