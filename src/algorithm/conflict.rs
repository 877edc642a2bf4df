// Detección de conflictos entre secciones.
use crate::models::{CandidateCourse, Section};

/// True si ambas secciones comparten algún día y sus franjas se solapan.
///
/// Una sección sin días no restringe nada y nunca entra en conflicto.
pub fn conflicts(s1: &Section, s2: &Section) -> bool {
    if !s1.days.intersects(&s2.days) {
        return false;
    }
    s1.window.overlaps(&s2.window)
}

/// Matriz de compatibilidad precalculada entre todas las secciones del pool.
///
/// Las secciones se numeran de forma global (curso por curso, en orden) y
/// `offsets[c]` es el índice global de la primera sección del curso `c`.
/// Los choques se guardan como bits (`n * n` bits, no bytes). Sólo se
/// calculan pares de cursos distintos: dos secciones del mismo curso nunca
/// se comparan.
#[derive(Debug, Clone)]
pub struct ConflictMatrix {
    offsets: Vec<usize>,
    n: usize,
    bits: Vec<u64>,
}

impl ConflictMatrix {
    pub fn build(pool: &[CandidateCourse]) -> Self {
        let mut offsets = Vec::with_capacity(pool.len() + 1);
        let mut flat: Vec<&Section> = Vec::new();
        for c in pool {
            offsets.push(flat.len());
            flat.extend(c.sections.iter());
        }
        offsets.push(flat.len());

        let n = flat.len();
        let mut matrix = ConflictMatrix { offsets, n, bits: vec![0; (n * n).div_ceil(64)] };
        for c in 0..pool.len() {
            let end_c = matrix.offsets[c + 1];
            for i in matrix.offsets[c]..end_c {
                for j in end_c..n {
                    if conflicts(flat[i], flat[j]) {
                        matrix.set(i, j);
                        matrix.set(j, i);
                    }
                }
            }
        }
        log::debug!(
            "[conflict] matriz {}x{} construida para {} cursos ({} palabras)",
            n,
            n,
            pool.len(),
            matrix.bits.len()
        );
        matrix
    }

    fn set(&mut self, a: usize, b: usize) {
        let bit = a * self.n + b;
        self.bits[bit / 64] |= 1 << (bit % 64);
    }

    /// Índice global de la sección `section` del curso `course`.
    pub fn global(&self, course: usize, section: usize) -> usize {
        self.offsets[course] + section
    }

    pub fn section_count(&self, course: usize) -> usize {
        self.offsets[course + 1] - self.offsets[course]
    }

    pub fn clashes(&self, a: usize, b: usize) -> bool {
        let bit = a * self.n + b;
        self.bits[bit / 64] & (1 << (bit % 64)) != 0
    }
}
