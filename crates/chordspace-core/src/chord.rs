//! Chords as points in a pitch space with one dimension per voice

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equivalence::{ChordSpace, Equivalence};
use crate::error::{ChordSpaceError, Result};
use crate::tolerance::{modulo, Tolerance, OCTAVE};

/// Generates the per-voice accessors for one auxiliary attribute.
macro_rules! voice_attribute {
    ($field:ident, $setter:ident, $voice_setter:ident, $slice:ident, $doc:literal) => {
        #[doc = concat!("The ", $doc, " of one voice.")]
        pub fn $field(&self, voice: usize) -> Option<f64> {
            self.$field.get(voice).copied()
        }

        #[doc = concat!("Sets the ", $doc, " of every voice.")]
        pub fn $setter(&mut self, value: f64) {
            self.$field.fill(value);
        }

        #[doc = concat!("Sets the ", $doc, " of one voice; out-of-range voices are ignored.")]
        pub fn $voice_setter(&mut self, voice: usize, value: f64) {
            if let Some(slot) = self.$field.get_mut(voice) {
                *slot = value;
            }
        }

        pub fn $slice(&self) -> &[f64] {
            &self.$field
        }
    };
}

/// A chord: one pitch per voice, plus per-voice performance attributes.
///
/// Pitches are semitones with middle C at 60 and the octave at 12. The
/// duration, channel, velocity and pan vectors always have one entry per
/// voice; no geometric operation reads them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ChordData")]
pub struct Chord {
    pitches: Vec<f64>,
    duration: Vec<f64>,
    channel: Vec<f64>,
    velocity: Vec<f64>,
    pan: Vec<f64>,
}

/// Wire form of a chord; missing or short attribute vectors are padded.
#[derive(Deserialize)]
struct ChordData {
    pitches: Vec<f64>,
    #[serde(default)]
    duration: Vec<f64>,
    #[serde(default)]
    channel: Vec<f64>,
    #[serde(default)]
    velocity: Vec<f64>,
    #[serde(default)]
    pan: Vec<f64>,
}

impl From<ChordData> for Chord {
    fn from(data: ChordData) -> Self {
        let mut chord = Self {
            pitches: data.pitches,
            duration: data.duration,
            channel: data.channel,
            velocity: data.velocity,
            pan: data.pan,
        };
        chord.resize(chord.pitches.len());
        chord
    }
}

impl From<Vec<f64>> for Chord {
    fn from(pitches: Vec<f64>) -> Self {
        let voices = pitches.len();
        Self {
            pitches,
            duration: vec![0.0; voices],
            channel: vec![0.0; voices],
            velocity: vec![0.0; voices],
            pan: vec![0.0; voices],
        }
    }
}

impl Chord {
    /// A chord of `voices` voices, all at the origin.
    pub fn new(voices: usize) -> Self {
        let mut chord = Self::default();
        chord.resize(voices);
        chord
    }

    pub fn from_pitches(pitches: &[f64]) -> Self {
        Self::from(pitches.to_vec())
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Resizes every per-voice vector. New voices are zeroed; extra voices are dropped.
    pub fn resize(&mut self, voices: usize) {
        for values in [
            &mut self.pitches,
            &mut self.duration,
            &mut self.channel,
            &mut self.velocity,
            &mut self.pan,
        ] {
            values.resize(voices, 0.0);
        }
    }

    /// Resizes the chord to `pitches.len()` voices and copies the pitches in.
    pub fn set(&mut self, pitches: &[f64]) {
        self.resize(pitches.len());
        self.pitches.copy_from_slice(pitches);
    }

    pub fn pitches(&self) -> &[f64] {
        &self.pitches
    }

    pub(crate) fn pitches_mut(&mut self) -> &mut [f64] {
        &mut self.pitches
    }

    pub fn pitch(&self, voice: usize) -> Option<f64> {
        self.pitches.get(voice).copied()
    }

    /// Sets the pitch of one voice; out-of-range voices are ignored.
    pub fn set_pitch(&mut self, voice: usize, value: f64) {
        if let Some(pitch) = self.pitches.get_mut(voice) {
            *pitch = value;
        }
    }

    voice_attribute!(duration, set_duration, set_voice_duration, durations, "duration");
    voice_attribute!(channel, set_channel, set_voice_channel, channels, "channel");
    voice_attribute!(velocity, set_velocity, set_voice_velocity, velocities, "velocity");
    voice_attribute!(pan, set_pan, set_voice_pan, pans, "pan");

    fn map_pitches(&self, f: impl Fn(f64) -> f64) -> Self {
        let mut chord = self.clone();
        for pitch in &mut chord.pitches {
            *pitch = f(*pitch);
        }
        chord
    }

    fn check_dimensions(&self, other: &Chord) -> Result<()> {
        if self.len() != other.len() {
            return Err(ChordSpaceError::DimensionMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Elementary geometry
    // ========================================================================

    /// Transposes every voice by `interval`. Applies no equivalence.
    pub fn translate(&self, interval: f64) -> Self {
        self.map_pitches(|pitch| pitch + interval)
    }

    /// Reflects every voice in `center`. Applies no equivalence.
    pub fn reflect(&self, center: f64) -> Self {
        self.map_pitches(|pitch| center - pitch)
    }

    /// Moves a single voice by `interval`. Applies no equivalence.
    pub fn move_voice(&self, voice: usize, interval: f64) -> Self {
        let mut chord = self.clone();
        if let Some(pitch) = chord.pitches.get_mut(voice) {
            *pitch += interval;
        }
        chord
    }

    pub fn floor(&self) -> Self {
        self.map_pitches(f64::floor)
    }

    pub fn ceil(&self) -> Self {
        self.map_pitches(f64::ceil)
    }

    /// Euclidean distance between two chords of the same dimensionality.
    pub fn distance(&self, other: &Chord) -> Result<f64> {
        self.check_dimensions(other)?;
        let sum: f64 = self
            .pitches
            .iter()
            .zip(&other.pitches)
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        Ok(sum.sqrt())
    }

    pub fn distance_to_origin(&self) -> f64 {
        self.pitches.iter().map(|p| p * p).sum::<f64>().sqrt()
    }

    /// Distance to the nearest point on the diagonal of unisons.
    pub fn distance_to_unison_diagonal(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mean = self.layer() / self.len() as f64;
        self.pitches
            .iter()
            .map(|p| (p - mean).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Sum of the pitches.
    pub fn layer(&self) -> f64 {
        self.pitches.iter().sum()
    }

    /// Lowest pitch and its voice; the first of several equal pitches wins.
    pub fn min(&self, tol: Tolerance) -> Option<(f64, usize)> {
        let mut lowest = (*self.pitches.first()?, 0);
        for (voice, &pitch) in self.pitches.iter().enumerate().skip(1) {
            if tol.lt(pitch, lowest.0) {
                lowest = (pitch, voice);
            }
        }
        Some(lowest)
    }

    /// Highest pitch and its voice; the first of several equal pitches wins.
    pub fn max(&self, tol: Tolerance) -> Option<(f64, usize)> {
        let mut highest = (*self.pitches.first()?, 0);
        for (voice, &pitch) in self.pitches.iter().enumerate().skip(1) {
            if tol.gt(pitch, highest.0) {
                highest = (pitch, voice);
            }
        }
        Some(highest)
    }

    /// Smallest distance between any two voices, 0 for fewer than two voices.
    pub fn minimum_interval(&self) -> f64 {
        self.intervals().reduce(f64::min).unwrap_or(0.0)
    }

    /// Largest distance between any two voices, 0 for fewer than two voices.
    pub fn maximum_interval(&self) -> f64 {
        self.intervals().reduce(f64::max).unwrap_or(0.0)
    }

    fn intervals(&self) -> impl Iterator<Item = f64> + '_ {
        self.pitches.iter().enumerate().flat_map(move |(i, a)| {
            self.pitches[i + 1..].iter().map(move |b| (a - b).abs())
        })
    }

    /// The origin of this chord's space.
    pub fn origin(&self) -> Self {
        self.map_pitches(|_| 0.0)
    }

    /// The maximally even chord of this dimensionality, e.g. the augmented
    /// triad `[0, 4, 8]` for three voices.
    pub fn maximally_even(&self) -> Self {
        let step = OCTAVE / self.len() as f64;
        let mut chord = self.clone();
        for (voice, pitch) in chord.pitches.iter_mut().enumerate() {
            *pitch = voice as f64 * step;
        }
        chord
    }

    // ========================================================================
    // Pitch classes
    // ========================================================================

    /// Every voice sent into `[0, range)`.
    pub fn er(&self, range: f64) -> Self {
        self.map_pitches(|pitch| modulo(pitch, range))
    }

    /// The pitch-class set of the chord, voice order preserved.
    pub fn epcs(&self) -> Self {
        self.er(OCTAVE)
    }

    pub fn is_epcs(&self, tol: Tolerance) -> bool {
        self.pitches
            .iter()
            .all(|&pitch| tol.eq(pitch, modulo(pitch, OCTAVE)))
    }

    /// Distinct pitch classes in ascending order.
    pub fn pitch_classes(&self, tol: Tolerance) -> Vec<f64> {
        let mut classes: Vec<f64> = Vec::with_capacity(self.len());
        for &pitch in &self.pitches {
            let mut pc = modulo(pitch, OCTAVE);
            if tol.eq(pc, OCTAVE) {
                pc = 0.0;
            }
            if !classes.iter().any(|&c| tol.eq(c, pc)) {
                classes.push(pc);
            }
        }
        classes.sort_by(f64::total_cmp);
        classes
    }

    /// Number of voices sounding `pitch`.
    pub fn count(&self, pitch: f64, tol: Tolerance) -> usize {
        self.pitches.iter().filter(|&&p| tol.eq(p, pitch)).count()
    }

    pub fn contains(&self, pitch: f64, tol: Tolerance) -> bool {
        self.pitches.iter().any(|&p| tol.eq(p, pitch))
    }

    // ========================================================================
    // Rotations and revoicings
    // ========================================================================

    /// Rotates the voices by `stride`. A positive stride moves the first
    /// voice to the end, the direction of a musician's first inversion.
    pub fn cycle(&self, stride: isize) -> Self {
        let mut chord = self.clone();
        if chord.is_empty() {
            return chord;
        }
        let shift = stride.rem_euclid(chord.len() as isize) as usize;
        chord.pitches.rotate_left(shift);
        chord
    }

    /// The N cyclic rotations of the voices, sorted.
    pub fn permutations(&self, tol: Tolerance) -> Vec<Chord> {
        let mut permutations: Vec<Chord> = (0..self.len() as isize)
            .map(|stride| self.cycle(stride))
            .collect();
        permutations.sort_by(|a, b| a.lex_cmp(b, tol));
        permutations
    }

    /// Inverts the chord in the musician's sense: for each positive step the
    /// lowest voice goes up by `range` and becomes the last voice; negative
    /// steps undo this.
    pub fn revoice(&self, direction: isize, range: f64) -> Self {
        let mut chord = self.clone();
        if chord.is_empty() {
            return chord;
        }
        let last = chord.len() - 1;
        for _ in 0..direction.max(0) {
            chord.pitches[0] += range;
            chord.pitches.rotate_left(1);
        }
        for _ in direction.min(0)..0 {
            chord.pitches[last] -= range;
            chord.pitches.rotate_right(1);
        }
        chord
    }

    /// The octave-wise revoicings of the chord, starting with the chord
    /// itself and applying [`Chord::revoice`] once per step.
    pub fn voicings(&self, range: f64) -> Voicings {
        Voicings {
            next: Some(self.clone()),
            remaining: self.len().max(1),
            range,
        }
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Voice-by-voice equality under `tol`. Chords of different
    /// dimensionality are never equal.
    pub fn approx_eq(&self, other: &Chord, tol: Tolerance) -> bool {
        self.len() == other.len()
            && self
                .pitches
                .iter()
                .zip(&other.pitches)
                .all(|(&a, &b)| tol.eq(a, b))
    }

    /// Lexicographic order under `tol`; the first differing voice decides.
    pub fn compare(&self, other: &Chord, tol: Tolerance) -> Result<Ordering> {
        self.check_dimensions(other)?;
        Ok(self.lex_cmp(other, tol))
    }

    pub fn lt(&self, other: &Chord, tol: Tolerance) -> Result<bool> {
        Ok(self.compare(other, tol)? == Ordering::Less)
    }

    pub fn le(&self, other: &Chord, tol: Tolerance) -> Result<bool> {
        Ok(self.compare(other, tol)? != Ordering::Greater)
    }

    pub fn gt(&self, other: &Chord, tol: Tolerance) -> Result<bool> {
        Ok(self.compare(other, tol)? == Ordering::Greater)
    }

    pub fn ge(&self, other: &Chord, tol: Tolerance) -> Result<bool> {
        Ok(self.compare(other, tol)? != Ordering::Less)
    }

    /// Lexicographic order without the dimensionality check; callers
    /// guarantee equal lengths.
    pub(crate) fn lex_cmp(&self, other: &Chord, tol: Tolerance) -> Ordering {
        debug_assert_eq!(self.len(), other.len());
        self.pitches
            .iter()
            .zip(&other.pitches)
            .map(|(&a, &b)| tol.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Lookup key built from the pitches rounded to six decimals.
    pub fn hash_key(&self) -> String {
        self.pitches
            .iter()
            .map(|pitch| {
                let text = format!("{pitch:.6}");
                if text == "-0.000000" { "0.000000".to_string() } else { text }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    // ========================================================================
    // Equivalence shortcuts
    // ========================================================================

    /// The representative of this chord under `equivalence`, using the
    /// default chord space.
    pub fn reduce(&self, equivalence: Equivalence) -> Chord {
        ChordSpace::default().reduce(self, equivalence)
    }

    pub fn is_in(&self, equivalence: Equivalence) -> bool {
        ChordSpace::default().is_in_domain(self, equivalence)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for pitch in &self.pitches {
            write!(f, "{pitch:12.7} ")?;
        }
        write!(f, "]")
    }
}

/// Iterator over the octave-wise revoicings of a chord.
///
/// Yields exactly one candidate per voice (one for an empty chord).
#[derive(Debug, Clone)]
pub struct Voicings {
    next: Option<Chord>,
    remaining: usize,
    range: f64,
}

impl Iterator for Voicings {
    type Item = Chord;

    fn next(&mut self) -> Option<Chord> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next.take()?;
        if self.remaining > 0 {
            self.next = Some(current.revoice(1, self.range));
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Voicings {}
