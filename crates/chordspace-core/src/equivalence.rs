//! Equivalence classes of chords: membership tests and reductions to
//! representative fundamental domains.
//!
//! The relations are octave (O, or range R in general), permutation (P),
//! transposition (T, and TT for an equal-tempered grid), inversion (I) and
//! voicing (V). Every reduction returns a new chord of the same
//! dimensionality and is idempotent on its own image.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::chord::Chord;
use crate::config::ChordSpaceConfig;
use crate::tolerance::{Tolerance, OCTAVE};

/// Tag naming an equivalence relation or a composition of relations.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Equivalence {
    /// Range equivalence with an arbitrary range.
    R(f64),
    O,
    P,
    T,
    /// Transposition on the equal-tempered grid of the chord space.
    TT,
    I,
    V,
    OP,
    OPT,
    OPTT,
    OPI,
    OPTI,
    OPTTI,
}

impl Equivalence {
    pub fn name(&self) -> &'static str {
        match self {
            Self::R(_) => "R",
            Self::O => "O",
            Self::P => "P",
            Self::T => "T",
            Self::TT => "TT",
            Self::I => "I",
            Self::V => "V",
            Self::OP => "OP",
            Self::OPT => "OPT",
            Self::OPTT => "OPTT",
            Self::OPI => "OPI",
            Self::OPTI => "OPTI",
            Self::OPTTI => "OPTTI",
        }
    }
}

/// The chord space the reductions operate in: a tolerance, the range of
/// octave equivalence and the generator of the tempered grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChordSpace {
    pub tolerance: Tolerance,
    pub octave: f64,
    pub generator: f64,
}

impl Default for ChordSpace {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            octave: OCTAVE,
            generator: 1.0,
        }
    }
}

impl ChordSpace {
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            ..Default::default()
        }
    }

    pub fn from_config(config: &ChordSpaceConfig) -> Self {
        Self {
            tolerance: Tolerance::new(config.epsilon_factor),
            octave: config.octave,
            generator: config.generator,
        }
    }

    /// Sends `chord` to the representative of its class under `equivalence`.
    pub fn reduce(&self, chord: &Chord, equivalence: Equivalence) -> Chord {
        match equivalence {
            Equivalence::R(range) => self.e_r(chord, range),
            Equivalence::O => self.e_o(chord),
            Equivalence::P => self.e_p(chord),
            Equivalence::T => self.e_t(chord),
            Equivalence::TT => self.e_tt(chord, self.generator),
            Equivalence::I => self.e_i(chord),
            Equivalence::V => self.e_v(chord, self.octave),
            Equivalence::OP => self.e_op(chord),
            Equivalence::OPT => self.e_opt(chord),
            Equivalence::OPTT => self.e_optt(chord),
            Equivalence::OPI => self.e_opi(chord),
            Equivalence::OPTI => self.e_opti(chord),
            Equivalence::OPTTI => self.e_optti(chord),
        }
    }

    /// Whether `chord` lies in the representative fundamental domain of `equivalence`.
    pub fn is_in_domain(&self, chord: &Chord, equivalence: Equivalence) -> bool {
        match equivalence {
            Equivalence::R(range) => self.is_r(chord, range),
            Equivalence::O => self.is_o(chord),
            Equivalence::P => self.is_p(chord),
            Equivalence::T => self.is_t(chord),
            Equivalence::TT => self.is_tt(chord, self.generator),
            Equivalence::I => self.is_i(chord),
            Equivalence::V => self.is_v(chord, self.octave),
            Equivalence::OP => self.is_op(chord),
            Equivalence::OPT => self.is_opt(chord),
            Equivalence::OPTT => self.is_optt(chord),
            Equivalence::OPI => self.is_opi(chord),
            Equivalence::OPTI => self.is_opti(chord),
            Equivalence::OPTTI => self.is_optti(chord),
        }
    }

    /// `a <= b` lexicographically; both come from the same reduction so
    /// their dimensionality matches.
    fn chord_le(&self, a: &Chord, b: &Chord) -> bool {
        a.lex_cmp(b, self.tolerance) != Ordering::Greater
    }

    // ========================================================================
    // Range (octave) equivalence
    // ========================================================================

    /// The chord spans at most `range` and its layer lies in `[0, range]`.
    pub fn is_r(&self, chord: &Chord, range: f64) -> bool {
        let tol = self.tolerance;
        let (Some((max, _)), Some((min, _))) = (chord.max(tol), chord.min(tol)) else {
            return true;
        };
        if !tol.le(max, min + range) {
            return false;
        }
        let layer = chord.layer();
        tol.le(0.0, layer) && tol.le(layer, range)
    }

    /// Moves every voice into `[0, range)`, then lowers the highest voice
    /// by `range` until the layer drops below `range`.
    pub fn e_r(&self, chord: &Chord, range: f64) -> Chord {
        let tol = self.tolerance;
        let mut normal = chord.er(range);
        if range <= 0.0 || !range.is_finite() || !normal.layer().is_finite() {
            tracing::debug!("Range reduction skipped for {} in range {}", chord, range);
            return normal;
        }
        // Each voice needs lowering at most once; precision loss on huge
        // pitches must not keep the loop going.
        for _ in 0..normal.len() {
            if tol.lt(normal.layer(), range) {
                break;
            }
            let Some((pitch, voice)) = normal.max(tol) else {
                break;
            };
            tracing::trace!("Revoicing voice {} from {} down by {}", voice, pitch, range);
            normal.set_pitch(voice, pitch - range);
        }
        normal
    }

    pub fn is_o(&self, chord: &Chord) -> bool {
        self.is_r(chord, self.octave)
    }

    pub fn e_o(&self, chord: &Chord) -> Chord {
        self.e_r(chord, self.octave)
    }

    // ========================================================================
    // Permutational equivalence
    // ========================================================================

    pub fn is_p(&self, chord: &Chord) -> bool {
        chord
            .pitches()
            .windows(2)
            .all(|pair| self.tolerance.le(pair[0], pair[1]))
    }

    /// Sorts the pitches ascending. Auxiliary attributes stay with their
    /// voice index.
    pub fn e_p(&self, chord: &Chord) -> Chord {
        let mut sorted = chord.clone();
        sorted.pitches_mut().sort_by(f64::total_cmp);
        sorted
    }

    // ========================================================================
    // Transpositional equivalence
    // ========================================================================

    pub fn is_t(&self, chord: &Chord) -> bool {
        self.tolerance.eq(chord.layer(), 0.0)
    }

    /// Projects the chord onto the hyperplane of zero layer.
    pub fn e_t(&self, chord: &Chord) -> Chord {
        if chord.is_empty() {
            return chord.clone();
        }
        chord.translate(-chord.layer() / chord.len() as f64)
    }

    pub fn is_tt(&self, chord: &Chord, g: f64) -> bool {
        self.e_tt(chord, g).approx_eq(chord, self.tolerance)
    }

    /// Projects onto zero layer, then transposes up so the lowest voice sits
    /// on the nearest multiple of `g` at or above it.
    pub fn e_tt(&self, chord: &Chord, g: f64) -> Chord {
        let tol = self.tolerance;
        let normal = self.e_t(chord);
        if g <= 0.0 || !g.is_finite() {
            tracing::debug!("Tempered transposition skipped for {} with generator {}", chord, g);
            return normal;
        }
        let Some((lowest, _)) = normal.min(tol) else {
            return normal;
        };
        let nearest = (lowest / g).round() * g;
        let target = if tol.eq(lowest, nearest) {
            nearest
        } else {
            (lowest / g).ceil() * g
        };
        normal.translate(target - lowest)
    }

    // ========================================================================
    // Inversional equivalence
    // ========================================================================

    /// Compares the first interval with the last, the second with the
    /// second-to-last and so on inward; the first unequal pair decides.
    pub fn is_i(&self, chord: &Chord) -> bool {
        let tol = self.tolerance;
        let pitches = chord.pitches();
        if pitches.len() < 2 {
            return true;
        }
        let mut lower = 1;
        let mut upper = pitches.len() - 1;
        while lower < upper {
            let lower_interval = pitches[lower] - pitches[lower - 1];
            let upper_interval = pitches[upper] - pitches[upper - 1];
            match tol.compare(lower_interval, upper_interval) {
                Ordering::Less => return true,
                Ordering::Greater => return false,
                Ordering::Equal => {}
            }
            lower += 1;
            upper -= 1;
        }
        true
    }

    pub fn e_i(&self, chord: &Chord) -> Chord {
        if self.is_i(chord) {
            return chord.clone();
        }
        chord.reflect(0.0)
    }

    // ========================================================================
    // Voicing equivalence
    // ========================================================================

    /// The interval wrapping from the top voice round to the bottom voice is
    /// at least as large as every interval between adjacent voices.
    pub fn is_v(&self, chord: &Chord, range: f64) -> bool {
        let pitches = chord.pitches();
        let (Some(&first), Some(&last)) = (pitches.first(), pitches.last()) else {
            return true;
        };
        let outer = first + range - last;
        pitches
            .windows(2)
            .all(|pair| self.tolerance.ge(outer, pair[1] - pair[0]))
    }

    /// The first of the chord's revoicings that is in the voicing domain.
    pub fn e_v(&self, chord: &Chord, range: f64) -> Chord {
        // The wrap-around interval takes each of the N cyclic intervals in
        // turn, so the voicing that puts the largest one there qualifies.
        let Some(voicing) = chord.voicings(range).find(|v| self.is_v(v, range)) else {
            tracing::error!("No voicing of {} lies in the voicing domain of range {}", chord, range);
            unreachable!("every chord has a revoicing in the voicing domain");
        };
        voicing
    }

    // ========================================================================
    // Compound equivalences
    // ========================================================================

    pub fn is_rp(&self, chord: &Chord, range: f64) -> bool {
        self.is_p(chord) && self.is_r(chord, range)
    }

    pub fn e_rp(&self, chord: &Chord, range: f64) -> Chord {
        self.e_p(&self.e_r(chord, range))
    }

    pub fn is_op(&self, chord: &Chord) -> bool {
        self.is_rp(chord, self.octave)
    }

    pub fn e_op(&self, chord: &Chord) -> Chord {
        self.e_rp(chord, self.octave)
    }

    pub fn is_rpt(&self, chord: &Chord, range: f64) -> bool {
        self.is_r(chord, range) && self.is_p(chord) && self.is_t(chord) && self.is_v(chord, range)
    }

    /// Chord type: the voicing-normal revoicing of the RP form, projected
    /// onto zero layer.
    pub fn e_rpt(&self, chord: &Chord, range: f64) -> Chord {
        let normal = self.e_rp(chord, range);
        self.e_t(&self.e_v(&normal, range))
    }

    pub fn is_opt(&self, chord: &Chord) -> bool {
        self.is_rpt(chord, self.octave)
    }

    pub fn e_opt(&self, chord: &Chord) -> Chord {
        self.e_rpt(chord, self.octave)
    }

    /// RP, TT and V, and the least of the tempered forms of its voicings.
    pub fn is_rptt(&self, chord: &Chord, range: f64, g: f64) -> bool {
        self.is_r(chord, range)
            && self.is_p(chord)
            && self.is_tt(chord, g)
            && self.is_v(chord, range)
            && self.chord_le(chord, &self.e_rptt(chord, range, g))
    }

    /// The least tempered form among the voicing-normal revoicings of the RP
    /// form. Several revoicings qualify when the largest cyclic interval is
    /// tied; taking the least makes the result independent of the voicing
    /// the chord arrived in.
    pub fn e_rptt(&self, chord: &Chord, range: f64, g: f64) -> Chord {
        let tol = self.tolerance;
        let normal = self.e_rp(chord, range);
        let least = normal
            .voicings(range)
            .filter(|voicing| self.is_v(voicing, range))
            .map(|voicing| self.e_tt(&voicing, g))
            .min_by(|a, b| a.lex_cmp(b, tol));
        match least {
            Some(tempered) => tempered,
            None => self.e_tt(&self.e_v(&normal, range), g),
        }
    }

    pub fn is_optt(&self, chord: &Chord) -> bool {
        self.is_rptt(chord, self.octave, self.generator)
    }

    pub fn e_optt(&self, chord: &Chord) -> Chord {
        self.e_rptt(chord, self.octave, self.generator)
    }

    /// RP, and no greater than the RP form of its own inversion.
    pub fn is_rpi(&self, chord: &Chord, range: f64) -> bool {
        if !self.is_rp(chord, range) {
            return false;
        }
        let inverse = self.e_rp(&chord.reflect(0.0), range);
        self.chord_le(chord, &inverse)
    }

    pub fn e_rpi(&self, chord: &Chord, range: f64) -> Chord {
        if self.is_rpi(chord, range) {
            return chord.clone();
        }
        let normal = self.e_rp(chord, range);
        let inverse = self.e_rp(&normal.reflect(0.0), range);
        if self.chord_le(&normal, &inverse) {
            normal
        } else {
            inverse
        }
    }

    pub fn is_opi(&self, chord: &Chord) -> bool {
        self.is_rpi(chord, self.octave)
    }

    pub fn e_opi(&self, chord: &Chord) -> Chord {
        self.e_rpi(chord, self.octave)
    }

    /// RPT, and either inversionally normal or already the lesser of itself
    /// and its RP inversion.
    pub fn is_rpti(&self, chord: &Chord, range: f64) -> bool {
        self.is_rpt(chord, range) && (self.is_i(chord) || self.is_rpi(chord, range))
    }

    pub fn e_rpti(&self, chord: &Chord, range: f64) -> Chord {
        let normal = self.e_rpt(chord, range);
        if self.is_i(&normal) {
            return normal;
        }
        tracing::trace!("Resolving inversion of chord type {}", normal);
        let inverted = self.e_rpi(&normal, range);
        self.e_rpt(&inverted, range)
    }

    pub fn is_opti(&self, chord: &Chord) -> bool {
        self.is_rpti(chord, self.octave)
    }

    pub fn e_opti(&self, chord: &Chord) -> Chord {
        self.e_rpti(chord, self.octave)
    }

    pub fn is_rptti(&self, chord: &Chord, range: f64, g: f64) -> bool {
        if !self.is_rptt(chord, range, g) {
            return false;
        }
        let inverse = self.e_rptt(&chord.reflect(0.0), range, g);
        self.chord_le(chord, &inverse)
    }

    /// The lesser of the RPTT form and the RPTT form of its inversion.
    pub fn e_rptti(&self, chord: &Chord, range: f64, g: f64) -> Chord {
        let normal = self.e_rptt(chord, range, g);
        let inverse = self.e_rptt(&normal.reflect(0.0), range, g);
        if self.chord_le(&normal, &inverse) {
            normal
        } else {
            inverse
        }
    }

    pub fn is_optti(&self, chord: &Chord) -> bool {
        self.is_rptti(chord, self.octave, self.generator)
    }

    pub fn e_optti(&self, chord: &Chord) -> Chord {
        self.e_rptti(chord, self.octave, self.generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Equivalence; 13] = [
        Equivalence::R(7.0),
        Equivalence::O,
        Equivalence::P,
        Equivalence::T,
        Equivalence::TT,
        Equivalence::I,
        Equivalence::V,
        Equivalence::OP,
        Equivalence::OPT,
        Equivalence::OPTT,
        Equivalence::OPI,
        Equivalence::OPTI,
        Equivalence::OPTTI,
    ];

    fn space() -> ChordSpace {
        ChordSpace::default()
    }

    fn chord(pitches: &[f64]) -> Chord {
        Chord::from_pitches(pitches)
    }

    fn assert_chord_eq(actual: &Chord, expected: &Chord) {
        assert!(
            actual.approx_eq(expected, Tolerance::default()),
            "expected {expected}, got {actual}"
        );
    }

    /// Pitch classes of the augmented and diminished-seventh families, so
    /// that equal largest cyclic intervals come up often.
    const SYMMETRIC_CLASSES: [f64; 7] = [0.0, 2.0, 3.0, 4.0, 6.0, 8.0, 9.0];

    /// Seeded chords of 1 to 7 voices: real-valued, integer, and integer
    /// chords drawn from a few symmetric pitch classes.
    fn sample_chords() -> Vec<Chord> {
        let mut rng = fastrand::Rng::with_seed(0x5eed_c0de);
        let mut chords = Vec::new();
        for voices in 1..=7 {
            for _ in 0..200 {
                let real: Vec<f64> = (0..voices).map(|_| rng.f64() * 130.0 - 30.0).collect();
                let whole: Vec<f64> = (0..voices).map(|_| rng.i32(24..=96) as f64).collect();
                let tied: Vec<f64> = (0..voices)
                    .map(|_| {
                        let class = SYMMETRIC_CLASSES[rng.usize(..SYMMETRIC_CLASSES.len())];
                        class + OCTAVE * rng.i32(2..=7) as f64
                    })
                    .collect();
                chords.push(Chord::from(real));
                chords.push(Chord::from(whole));
                chords.push(Chord::from(tied));
            }
        }
        chords
    }

    #[test]
    fn test_reductions_land_in_their_domain() {
        let space = space();
        for c in sample_chords() {
            for eq in ALL {
                let reduced = space.reduce(&c, eq);
                assert_eq!(reduced.len(), c.len());
                assert!(
                    space.is_in_domain(&reduced, eq),
                    "{} of {} gave {} outside the domain",
                    eq.name(),
                    c,
                    reduced
                );
            }
        }
    }

    #[test]
    fn test_reductions_are_idempotent() {
        let space = space();
        for c in sample_chords() {
            for eq in ALL {
                let once = space.reduce(&c, eq);
                let twice = space.reduce(&once, eq);
                assert!(
                    twice.approx_eq(&once, space.tolerance),
                    "{} not idempotent on {}: {} then {}",
                    eq.name(),
                    c,
                    once,
                    twice
                );
            }
        }
    }

    #[test]
    fn test_compositions_match_their_definitions() {
        let space = space();
        for c in sample_chords() {
            assert_chord_eq(&space.e_op(&c), &space.e_p(&space.e_o(&c)));
            let voiced = space.e_v(&space.e_op(&c), OCTAVE);
            assert_chord_eq(&space.e_opt(&c), &space.e_t(&voiced));
            assert_chord_eq(&space.e_optt(&c), &space.e_optt(&space.e_op(&c)));
            assert_chord_eq(&space.e_opt(&c), &space.e_opt(&space.e_op(&c)));
            assert_chord_eq(&space.e_opi(&c), &space.e_opi(&space.e_op(&c)));
            assert_chord_eq(&space.e_opti(&c), &space.e_opti(&space.e_opt(&c)));
            assert_chord_eq(&space.e_optti(&c), &space.e_optti(&space.e_optt(&c)));
        }
    }

    #[test]
    fn test_op_is_invariant_under_octaves_and_permutations() {
        let space = space();
        let mut rng = fastrand::Rng::with_seed(42);
        for voices in [2, 3, 4, 6] {
            for _ in 0..200 {
                let pitches: Vec<f64> = (0..voices).map(|_| rng.i32(24..=96) as f64).collect();
                let original = Chord::from(pitches.clone());
                let mut moved = pitches;
                rng.shuffle(&mut moved);
                let octaves = rng.i32(-3..=3) as f64;
                let moved = Chord::from(moved).translate(octaves * OCTAVE);
                assert_chord_eq(&space.e_op(&moved), &space.e_op(&original));
            }
        }
    }

    #[test]
    fn test_opt_is_invariant_under_transposition() {
        let space = space();
        let chords = [
            chord(&[60.0, 64.0, 67.0]),
            chord(&[60.0, 63.0, 67.0]),
            chord(&[55.0, 59.0, 62.0, 65.0]),
            chord(&[62.0, 65.0, 69.0, 72.0]),
        ];
        for c in &chords {
            let expected = space.e_opt(c);
            for semitones in -13..=13 {
                let moved = c.translate(semitones as f64);
                assert_chord_eq(&space.e_opt(&moved), &expected);
                assert_chord_eq(&space.e_opt(&moved.cycle(1)), &expected);
            }
        }
    }

    #[test]
    fn test_c_major_under_op() {
        let space = space();
        let op = space.e_op(&chord(&[60.0, 64.0, 67.0]));
        assert_chord_eq(&op, &chord(&[0.0, 4.0, 7.0]));
        assert!(op.pitches().iter().all(|&p| (0.0..=12.0).contains(&p)));
        assert!((0.0..=12.0).contains(&op.layer()));
    }

    #[test]
    fn test_r_revoices_excess_layer() {
        let space = space();
        let augmented = space.e_o(&chord(&[60.0, 64.0, 68.0]));
        assert_chord_eq(&augmented, &chord(&[0.0, 4.0, -4.0]));
        assert_chord_eq(&space.e_op(&chord(&[60.0, 64.0, 68.0])), &chord(&[-4.0, 0.0, 4.0]));
        assert!(space.is_o(&chord(&[0.0, 0.0, 12.0])));
        assert!(!space.is_o(&chord(&[0.0, 13.0])));
        assert!(!space.is_o(&chord(&[-1.0, -2.0])));
    }

    #[test]
    fn test_inversion_is_tested_from_the_outside_in() {
        let space = space();
        assert!(space.is_i(&chord(&[0.0, 3.0, 7.0])));
        assert!(!space.is_i(&chord(&[0.0, 4.0, 7.0])));
        assert!(space.is_i(&chord(&[0.0, 4.0, 8.0])));
        // Outer intervals tie, the inner pair decides.
        assert!(space.is_i(&chord(&[0.0, 2.0, 5.0, 9.0, 11.0])));
        assert!(!space.is_i(&chord(&[0.0, 2.0, 6.0, 9.0, 11.0])));
        assert_chord_eq(&space.e_i(&chord(&[0.0, 4.0, 7.0])), &chord(&[0.0, -4.0, -7.0]));
    }

    #[test]
    fn test_voicing_picks_the_most_compact_revoicing() {
        let space = space();
        let first_inversion = chord(&[64.0, 67.0, 72.0]);
        assert!(!space.is_v(&first_inversion, OCTAVE));
        assert_chord_eq(&space.e_v(&first_inversion, OCTAVE), &chord(&[72.0, 76.0, 79.0]));
        assert_chord_eq(&space.e_v(&chord(&[60.0, 64.0, 67.0]), OCTAVE), &chord(&[60.0, 64.0, 67.0]));
    }

    #[test]
    fn test_unison_is_in_p_v_and_i_for_every_range() {
        let space = space();
        let unison = chord(&[57.0, 57.0, 57.0]);
        assert!(space.is_p(&unison));
        assert!(space.is_i(&unison));
        for range in [1.0, 5.0, 12.0, 24.0] {
            assert!(space.is_v(&unison, range));
        }
    }

    #[test]
    fn test_inversion_classes_of_major_and_minor_triads() {
        let space = space();
        let major = chord(&[60.0, 64.0, 67.0]);
        let minor = chord(&[60.0, 63.0, 67.0]);
        let reflected = major.reflect(0.0);
        assert_eq!(reflected.pitches(), &[-60.0, -64.0, -67.0]);

        assert_chord_eq(&space.e_rpi(&major, OCTAVE), &space.e_rpi(&reflected, OCTAVE));
        assert_chord_eq(&space.e_opi(&major), &chord(&[-4.0, 0.0, 5.0]));

        let major_opti = space.e_opti(&major);
        let minor_opti = space.e_opti(&minor);
        assert!(!major_opti.approx_eq(&minor_opti, space.tolerance));

        assert_chord_eq(&space.e_optti(&major), &chord(&[-3.0, 0.0, 4.0]));
        assert_chord_eq(&space.e_optti(&minor), &chord(&[-3.0, 0.0, 4.0]));
    }

    #[test]
    fn test_optti_is_stable_when_largest_intervals_tie() {
        let space = space();
        // Cyclic intervals 1, 3, 3, 2, 3: three voicings are voicing-normal.
        let c = chord(&[1.0, 2.0, 5.0, 8.0, 10.0]);
        let once = space.e_optti(&c);
        assert!(space.is_optti(&once), "{once} outside the domain");
        assert_chord_eq(&once, &chord(&[-5.0, -2.0, 0.0, 3.0, 4.0]));
        assert_chord_eq(&space.e_optti(&once), &once);

        let tempered = space.e_optt(&c);
        assert!(space.is_optt(&tempered));
        for voicing in tempered.voicings(OCTAVE) {
            assert_chord_eq(&space.e_optt(&voicing), &tempered);
        }
    }

    #[test]
    fn test_degenerate_ranges_and_generators_terminate() {
        let space = space();
        let huge = chord(&[1e300, -1e300, 60.0]);
        assert_eq!(space.e_o(&huge).len(), 3);
        assert_eq!(space.e_op(&huge).len(), 3);

        let c = chord(&[0.0, 4.0, 7.0]);
        for g in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let reduced = space.e_tt(&c, g);
            assert!(reduced.pitches().iter().all(|p| p.is_finite()));
            assert_chord_eq(&reduced, &space.e_t(&c));
        }
        let broken = ChordSpace {
            generator: 0.0,
            ..space
        };
        assert!(broken.e_optt(&c).pitches().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_tempered_transposition_snaps_to_the_grid() {
        let space = space();
        let major = chord(&[60.0, 64.0, 67.0]);
        assert_chord_eq(&space.e_optt(&major), &chord(&[-3.0, 1.0, 4.0]));
        assert_chord_eq(&space.e_tt(&chord(&[0.0, 4.0, 8.0]), 1.0), &chord(&[-4.0, 0.0, 4.0]));
        let half = space.e_tt(&chord(&[0.0, 4.0, 7.0]), 0.5);
        assert_chord_eq(&half, &chord(&[-3.5, 0.5, 3.5]));
        assert!(space.is_tt(&half, 0.5));
        assert!(!space.is_tt(&half, 1.0));
    }

    #[test]
    fn test_config_drives_octave_and_generator() {
        let config = ChordSpaceConfig {
            octave: 24.0,
            generator: 0.5,
            ..Default::default()
        };
        let space = ChordSpace::from_config(&config);
        let reduced = space.reduce(&chord(&[60.0, 64.0, 67.0]), Equivalence::OP);
        assert_chord_eq(&reduced, &chord(&[-5.0, 12.0, 16.0]));
        assert!(space.is_in_domain(&reduced, Equivalence::OP));
        assert_chord_eq(
            &space.reduce(&chord(&[0.0, 4.0, 7.0]), Equivalence::TT),
            &chord(&[-3.5, 0.5, 3.5]),
        );
    }

    #[test]
    fn test_chord_shortcuts_use_the_default_space() {
        let c = chord(&[67.0, 60.0, 64.0]);
        assert_chord_eq(&c.reduce(Equivalence::OP), &chord(&[0.0, 4.0, 7.0]));
        assert!(!c.is_in(Equivalence::P));
        assert!(c.reduce(Equivalence::OPT).is_in(Equivalence::OPT));
    }
}
