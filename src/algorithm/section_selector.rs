use std::time::Instant;

use crate::algorithm::conflict::ConflictMatrix;

/// Cada cuántos nodos se consulta el reloj durante el backtracking.
const DEADLINE_CHECK_EVERY: u64 = 1024;

/// Topes para la búsqueda de un testigo.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionBudget {
    pub max_attempts: Option<u64>,
    pub deadline: Option<Instant>,
}

/// Resultado de buscar un testigo para un conjunto de cursos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Índice de sección elegido para cada curso del subconjunto, en orden.
    Found(Vec<usize>),
    /// Se recorrió todo el espacio sin asignación válida.
    Exhausted,
    /// Se agotó el tope de intentos antes de decidir.
    Abandoned,
    /// Venció la fecha límite en medio del backtracking.
    TimedOut,
}

/// Dado un subconjunto de cursos (índices del pool), intenta seleccionar
/// exactamente una sección por curso sin solapamientos.
///
/// Estrategia: backtracking en profundidad siguiendo el orden del subconjunto
/// y el orden de las secciones dentro de cada curso. Cada sección candidata se
/// compara sólo contra las ya comprometidas, así que un conflicto poda todo el
/// subárbol sin construir la tupla completa. Devuelve la primera asignación
/// válida encontrada (determinista).
///
/// `budget.max_attempts` acota el número de secciones probadas para este
/// subconjunto; `budget.deadline` se revisa cada `DEADLINE_CHECK_EVERY` nodos.
pub fn select_non_conflicting_sections(
    subset: &[usize],
    matrix: &ConflictMatrix,
    budget: SelectionBudget,
) -> Selection {
    if subset.is_empty() {
        return Selection::Found(vec![]);
    }

    struct Ctx<'a> {
        subset: &'a [usize],
        matrix: &'a ConflictMatrix,
        chosen: Vec<usize>,
        picks: Vec<usize>,
        attempts: u64,
        budget: SelectionBudget,
    }

    enum Step {
        Done,
        Dead,
        Budget,
        Late,
    }

    fn backtrack(pos: usize, ctx: &mut Ctx<'_>) -> Step {
        if pos == ctx.subset.len() {
            return Step::Done;
        }
        let course = ctx.subset[pos];
        for sect in 0..ctx.matrix.section_count(course) {
            if let Some(max) = ctx.budget.max_attempts {
                if ctx.attempts >= max {
                    return Step::Budget;
                }
            }
            if ctx.attempts % DEADLINE_CHECK_EVERY == 0
                && ctx.budget.deadline.is_some_and(|d| Instant::now() >= d)
            {
                return Step::Late;
            }
            ctx.attempts += 1;

            let g = ctx.matrix.global(course, sect);
            if ctx.chosen.iter().any(|&c| ctx.matrix.clashes(c, g)) {
                continue;
            }
            ctx.chosen.push(g);
            ctx.picks.push(sect);
            match backtrack(pos + 1, ctx) {
                Step::Done => return Step::Done,
                Step::Budget => return Step::Budget,
                Step::Late => return Step::Late,
                Step::Dead => {
                    ctx.chosen.pop();
                    ctx.picks.pop();
                }
            }
        }
        Step::Dead
    }

    let mut ctx = Ctx {
        subset,
        matrix,
        chosen: Vec::with_capacity(subset.len()),
        picks: Vec::with_capacity(subset.len()),
        attempts: 0,
        budget,
    };

    match backtrack(0, &mut ctx) {
        Step::Done => Selection::Found(ctx.picks),
        Step::Dead => Selection::Exhausted,
        Step::Budget => Selection::Abandoned,
        Step::Late => Selection::TimedOut,
    }
}
