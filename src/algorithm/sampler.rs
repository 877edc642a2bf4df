use rand::seq::index;
use rand::Rng;

/// Muestra uniforme sin reemplazo de `min(cap, len)` elementos.
///
/// Si la lista no supera el tope se devuelve intacta. En otro caso los
/// elegidos conservan su orden relativo de entrada.
pub fn sample_without_replacement<T, R>(items: Vec<T>, cap: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    if items.len() <= cap {
        return items;
    }
    let mut picked = index::sample(rng, items.len(), cap).into_vec();
    picked.sort_unstable();

    let mut wanted = picked.into_iter().peekable();
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            if wanted.peek() == Some(&i) {
                wanted.next();
                Some(item)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_small_list_unchanged() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(sample_without_replacement(vec![3, 1, 2], 50, &mut rng), vec![3, 1, 2]);
        assert_eq!(sample_without_replacement(vec![3, 1, 2], 3, &mut rng), vec![3, 1, 2]);
    }

    #[test]
    fn test_cap_respected_without_repeats() {
        let mut rng = StdRng::seed_from_u64(42);
        let out = sample_without_replacement((0..200).collect::<Vec<_>>(), 50, &mut rng);
        assert_eq!(out.len(), 50);
        let uniq: HashSet<_> = out.iter().collect();
        assert_eq!(uniq.len(), 50);
        assert!(out.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_cap() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_without_replacement(vec![1, 2, 3], 0, &mut rng).is_empty());
    }

    #[test]
    fn test_every_element_can_be_drawn() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            for x in sample_without_replacement((0..10).collect::<Vec<_>>(), 2, &mut rng) {
                seen.insert(x);
            }
        }
        assert_eq!(seen.len(), 10);
    }
}
