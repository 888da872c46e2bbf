//! chordspace-core: Chords as points in pitch space, reduced to canonical
//! forms under octave, permutation, transposition, inversion and voicing
//! equivalence

pub mod chord;
pub mod config;
pub mod equivalence;
mod error;
pub mod names;
pub mod tolerance;
mod transforms;

pub use chord::{Chord, Voicings};
pub use config::ChordSpaceConfig;
pub use equivalence::{ChordSpace, Equivalence};
pub use error::{ChordSpaceError, Result};
pub use names::{chord_for_name, name_for_chord, pitch_class_for_name, ChordNameTable, ChordTemplate};
pub use tolerance::{epsilon, modulo, Tolerance, DEFAULT_EPSILON_FACTOR, MIDDLE_C, OCTAVE};
