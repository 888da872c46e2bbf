//! Neo-Riemannian and contextual transformations of chords.
//!
//! None of these reduce their result; reduce again for a canonical form.

use crate::chord::Chord;
use crate::equivalence::ChordSpace;
use crate::tolerance::Tolerance;

/// Quality of a triad in its voicing-normal form.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Triad {
    Major,
    Minor,
    Other,
}

/// Decided by the middle voice alone: 4 above the lowest is major, 3 is minor.
fn classify(voiced: &Chord, tol: Tolerance) -> Triad {
    let &[root, third, _] = voiced.pitches() else {
        return Triad::Other;
    };
    let third = third - root;
    if tol.eq(third, 4.0) {
        Triad::Major
    } else if tol.eq(third, 3.0) {
        Triad::Minor
    } else {
        Triad::Other
    }
}

/// Upper bound on grid points per octave for the contextual operations.
const MAX_GRID_STEPS: usize = 1200;

fn same_classes(a: &[f64], b: &[f64], tol: Tolerance) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| tol.eq(x, y))
}

fn shared_classes(a: &[f64], b: &[f64], tol: Tolerance) -> usize {
    a.iter().filter(|&&x| b.iter().any(|&y| tol.eq(x, y))).count()
}

impl ChordSpace {
    fn voiced_triad(&self, chord: &Chord) -> (Chord, Triad) {
        let voiced = self.e_v(&self.e_p(chord), self.octave);
        let quality = classify(&voiced, self.tolerance);
        (voiced, quality)
    }

    /// Parallel: exchanges major and minor over the same root.
    pub fn nr_p(&self, chord: &Chord) -> Chord {
        let (mut voiced, quality) = self.voiced_triad(chord);
        let pitches = voiced.pitches_mut();
        match quality {
            Triad::Major => pitches[1] -= 1.0,
            Triad::Minor => pitches[1] += 1.0,
            Triad::Other => {}
        }
        voiced
    }

    /// Leading-tone exchange.
    pub fn nr_l(&self, chord: &Chord) -> Chord {
        let (mut voiced, quality) = self.voiced_triad(chord);
        let pitches = voiced.pitches_mut();
        match quality {
            Triad::Major => pitches[0] -= 1.0,
            Triad::Minor => pitches[2] += 1.0,
            Triad::Other => {}
        }
        voiced
    }

    /// Relative: a major triad to the minor triad a minor third lower, and back.
    pub fn nr_r(&self, chord: &Chord) -> Chord {
        let (mut voiced, quality) = self.voiced_triad(chord);
        let pitches = voiced.pitches_mut();
        match quality {
            Triad::Major => pitches[2] += 2.0,
            Triad::Minor => pitches[0] -= 2.0,
            Triad::Other => {}
        }
        voiced
    }

    /// Dominant: down a perfect fifth.
    pub fn nr_d(&self, chord: &Chord) -> Chord {
        chord.translate(-7.0)
    }

    /// Interchange by inversion about the sum of the outer voices.
    ///
    /// Coincides with [`ChordSpace::nr_p`] on major and minor triads up to
    /// voice order.
    pub fn k(&self, chord: &Chord) -> Chord {
        let sorted = self.e_p(chord);
        let (Some(&lowest), Some(&highest)) = (sorted.pitches().first(), sorted.pitches().last())
        else {
            return chord.clone();
        };
        chord.reflect(lowest + highest)
    }

    /// Steps of the tempered grid inside one octave. Empty for an unusable
    /// generator or octave.
    fn grid(&self) -> impl Iterator<Item = f64> + '_ {
        let ratio = self.octave / self.generator;
        let steps = if self.generator > 0.0 && ratio.is_finite() && ratio > 0.0 {
            ratio.round().max(1.0) as usize
        } else {
            tracing::warn!(
                "No tempered grid for generator {} in octave {}",
                self.generator,
                self.octave
            );
            0
        };
        if steps > MAX_GRID_STEPS {
            tracing::warn!("Tempered grid of {} steps truncated to {}", steps, MAX_GRID_STEPS);
        }
        (0..steps.min(MAX_GRID_STEPS)).map(|step| step as f64 * self.generator)
    }

    /// Whether the pitch classes of `chord` are a transposition of those of `reference`.
    pub fn is_t_form(&self, chord: &Chord, reference: &Chord) -> bool {
        let tol = self.tolerance;
        let classes = chord.pitch_classes(tol);
        self.grid()
            .any(|step| same_classes(&classes, &reference.translate(step).pitch_classes(tol), tol))
    }

    /// Whether the pitch classes of `chord` are an inversion of those of `reference`.
    pub fn is_i_form(&self, chord: &Chord, reference: &Chord) -> bool {
        let tol = self.tolerance;
        let classes = chord.pitch_classes(tol);
        self.grid()
            .any(|step| same_classes(&classes, &reference.reflect(step).pitch_classes(tol), tol))
    }

    /// Contextual transposition: up `n` for a T-form of `reference`, down
    /// `n` for an I-form, otherwise unchanged.
    pub fn q(&self, chord: &Chord, n: f64, reference: &Chord) -> Chord {
        if self.is_t_form(chord, reference) {
            chord.translate(n)
        } else if self.is_i_form(chord, reference) {
            chord.translate(-n)
        } else {
            chord.clone()
        }
    }

    /// Contextual inversion: every inversion of `chord` that keeps exactly
    /// `n` of its pitch classes, ascending and without duplicates.
    ///
    /// Each inversion is taken about a grid point moved by whole octaves
    /// into the chord's own register.
    pub fn j(&self, chord: &Chord, n: usize) -> Vec<Chord> {
        let tol = self.tolerance;
        if chord.is_empty() {
            return Vec::new();
        }
        let classes = chord.pitch_classes(tol);
        let doubled_mean = 2.0 * chord.layer() / chord.len() as f64;
        let mut inversions: Vec<Chord> = self
            .grid()
            .map(|center| {
                let octaves = ((doubled_mean - center) / self.octave).round();
                chord.reflect(center + octaves * self.octave)
            })
            .filter(|inversion| shared_classes(&classes, &inversion.pitch_classes(tol), tol) == n)
            .collect();
        inversions.sort_by(|a, b| a.lex_cmp(b, tol));
        inversions.dedup_by(|a, b| a.approx_eq(b, tol));
        inversions
    }

    /// The `index`th member of [`ChordSpace::j`], if there is one.
    pub fn j_at(&self, chord: &Chord, n: usize, index: usize) -> Option<Chord> {
        self.j(chord, n).into_iter().nth(index)
    }
}
