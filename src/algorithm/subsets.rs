//! Enumeración lexicográfica de subconjuntos de tamaño k sobre índices `0..n`.
//!
//! Además del iterador, expone conteo binomial y "unranking" para que la
//! búsqueda paralela pueda repartir rangos contiguos de rangos entre hilos.

/// C(n, k); `None` si no cabe en u128.
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}

/// Subconjunto en la posición `rank` del orden lexicográfico.
pub fn unrank(n: usize, k: usize, mut rank: u128) -> Option<Vec<usize>> {
    let mut out = Vec::with_capacity(k);
    let mut candidate = 0usize;
    for pos in 0..k {
        loop {
            if candidate >= n {
                return None;
            }
            let rest = binomial(n - candidate - 1, k - pos - 1)?;
            if rank < rest {
                break;
            }
            rank -= rest;
            candidate += 1;
        }
        out.push(candidate);
        candidate += 1;
    }
    if rank == 0 { Some(out) } else { None }
}

/// Iterador de combinaciones sin repetición, en orden lexicográfico.
#[derive(Debug, Clone)]
pub struct Subsets {
    n: usize,
    k: usize,
    current: Option<Vec<usize>>,
    started: bool,
}

impl Subsets {
    pub fn new(n: usize, k: usize) -> Self {
        let current = if k <= n { Some((0..k).collect()) } else { None };
        Subsets { n, k, current, started: false }
    }

    /// Comienza en un subconjunto dado (p. ej. el resultado de `unrank`).
    pub fn starting_at(n: usize, first: Vec<usize>) -> Self {
        let k = first.len();
        Subsets { n, k, current: Some(first), started: false }
    }

    fn advance(&mut self) {
        let Some(idx) = self.current.as_mut() else { return };
        let (n, k) = (self.n, self.k);
        let mut i = k;
        while i > 0 {
            i -= 1;
            if idx[i] < n - k + i {
                idx[i] += 1;
                for j in (i + 1)..k {
                    idx[j] = idx[j - 1] + 1;
                }
                return;
            }
        }
        self.current = None;
    }
}

impl Iterator for Subsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.started {
            self.advance();
        } else {
            self.started = true;
        }
        self.current.clone()
    }
}
