//! Chord name table: jazz-style chord names and scale names mapped to
//! OP-normal chords, and back.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::chord::Chord;
use crate::equivalence::ChordSpace;
use crate::error::{ChordSpaceError, Result};

/// Recognised pitch spellings and their pitch classes, in table-building order.
pub const PITCH_NAMES: &[(&str, f64)] = &[
    ("C", 0.0),
    ("C#", 1.0),
    ("Db", 1.0),
    ("D", 2.0),
    ("D#", 3.0),
    ("Eb", 3.0),
    ("E", 4.0),
    ("F", 5.0),
    ("F#", 6.0),
    ("Gb", 6.0),
    ("G", 7.0),
    ("G#", 8.0),
    ("Ab", 8.0),
    ("A", 9.0),
    ("A#", 10.0),
    ("Bb", 10.0),
    ("B", 11.0),
];

/// A chord type spelled over C; the suffix is appended to the root name.
#[derive(Debug, Clone, Copy)]
pub struct ChordTemplate {
    pub suffix: &'static str,
    pub pitches: &'static str,
}

const fn template(suffix: &'static str, pitches: &'static str) -> ChordTemplate {
    ChordTemplate { suffix, pitches }
}

/// Every chord type in the table. Later entries win when two names reduce
/// to the same chord.
pub const CHORD_TEMPLATES: &[ChordTemplate] = &[
    // Intervals
    template(" minor second", "C  C#"),
    template(" major second", "C     D"),
    template(" minor third", "C        Eb"),
    template(" major third", "C           E"),
    template(" perfect fourth", "C              F"),
    template(" tritone", "C                 F#"),
    template(" perfect fifth", "C                    G"),
    template(" augmented fifth", "C                       G#"),
    template(" sixth", "C                          A"),
    template(" minor seventh", "C                             Bb"),
    template(" major seventh", "C                                B"),
    // Scales
    template(" major", "C     D     E  F     G     A     B"),
    template(" minor", "C     D  Eb    F     G  Ab    Bb"),
    template(" natural minor", "C     D  Eb    F     G  Ab    Bb"),
    template(" harmonic minor", "C     D  Eb    F     G  Ab       B"),
    template(" chromatic", "C  C# D  D# E  F  F# G  G# A  A# B"),
    template(" whole tone", "C     D     E     F#    G#    A#"),
    template(" diminished", "C     D  D#    F  F#    G# A     B"),
    template(" pentatonic", "C     D     E        G     A"),
    template(" pentatonic major", "C     D     E        G     A"),
    template(" pentatonic minor", "C        Eb    F     G        Bb"),
    template(" augmented", "C        Eb E        G  Ab    Bb"),
    template(" Lydian dominant", "C     D     E     Gb G     A  Bb"),
    template(" 3 semitone", "C        D#       F#       A"),
    template(" 4 semitone", "C           E           G#"),
    template(" blues", "C     D  Eb    F  Gb G        Bb"),
    template(" bebop", "C     D     E  F     G     A  Bb B"),
    // Major chords
    template("M", "C           E        G"),
    template("6", "C           E        G     A"),
    template("69", "C     D     E        G     A"),
    template("69b5", "C     D     E     Gb       A"),
    template("M7", "C           E        G           B"),
    template("M9", "C     D     E        G           B"),
    template("M11", "C     D     E  F     G           B"),
    template("M#11", "C     D     E  F#    G           B"),
    template("M13", "C     D     E  F     G     A     B"),
    // Minor chords
    template("m", "C        Eb          G"),
    template("m6", "C        Eb          G     A"),
    template("m69", "C     D  Eb          G     A"),
    template("m7", "C        Eb          G        Bb"),
    template("m#7", "C        Eb          G           B"),
    template("m7b5", "C        Eb       Gb          Bb"),
    template("m9", "C     D  Eb          G        Bb"),
    template("m9#7", "C     D  Eb          G           B"),
    template("m11", "C     D  Eb    F     G        Bb"),
    template("m13", "C     D  Eb    F     G     A  Bb"),
    // Augmented chords
    template("+", "C            E         G#"),
    template("7#5", "C            E         G#     Bb"),
    template("7b9#5", "C  Db        E         G#     Bb"),
    template("9#5", "C     D      E         G#     Bb"),
    // Diminished chords
    template("o", "C        Eb       Gb"),
    template("o7", "C        Eb       Gb       A"),
    // Suspended chords
    template("6sus", "C              F     G     A"),
    template("69sus", "C     D        F     G     A"),
    template("7sus", "C              F     G        Bb"),
    template("9sus", "C     D        F     G        Bb"),
    template("M7sus", "C              F     G           B"),
    template("M9sus", "C     D        F     G           B"),
    // Dominant chords
    template("7", "C            E       G        Bb"),
    template("7b5", "C            E    Gb          Bb"),
    template("7b9", "C  Db        E       G        Bb"),
    template("7b9b5", "C  Db        E    Gb          Bb"),
    template("9", "C     D      E       G        Bb"),
    template("9#11", "C     D      E F#    G        Bb"),
    template("13", "C     D      E F     G     A  Bb"),
    template("13#11", "C     D      E F#    G     A  Bb"),
];

/// Pitch class of a spelling such as `"F#"` or `"Bb"`.
pub fn pitch_class_for_name(name: &str) -> Option<f64> {
    PITCH_NAMES
        .iter()
        .find(|(spelling, _)| *spelling == name)
        .map(|&(_, pitch_class)| pitch_class)
}

/// Bidirectional map between chord names and OP-normal chords.
#[derive(Debug, Clone, Default)]
pub struct ChordNameTable {
    space: ChordSpace,
    chords: HashMap<String, Chord>,
    names: HashMap<String, String>,
}

static GLOBAL_TABLE: OnceLock<ChordNameTable> = OnceLock::new();

impl ChordNameTable {
    /// Builds the table from [`CHORD_TEMPLATES`] over every root in [`PITCH_NAMES`].
    pub fn build(space: &ChordSpace) -> Self {
        Self::with_templates(space, CHORD_TEMPLATES)
    }

    /// Builds a table from `templates`, skipping any that cannot be spelled.
    pub fn with_templates(space: &ChordSpace, templates: &[ChordTemplate]) -> Self {
        let mut table = Self {
            space: *space,
            ..Default::default()
        };
        let mut skipped = 0;
        for &(root_name, root) in PITCH_NAMES {
            for template in templates {
                let name = format!("{root_name}{}", template.suffix);
                match spell(root, template.pitches, &name) {
                    Ok(chord) => table.insert(name, space.e_op(&chord)),
                    Err(e) => {
                        tracing::warn!("Skipping chord template {}: {}", name, e);
                        skipped += 1;
                    }
                }
            }
        }
        tracing::debug!(
            "Built chord name table: {} names, {} chords, {} skipped",
            table.chords.len(),
            table.names.len(),
            skipped
        );
        table
    }

    /// The process-wide table for the default chord space, built on first use.
    pub fn global() -> &'static ChordNameTable {
        GLOBAL_TABLE.get_or_init(|| Self::build(&ChordSpace::default()))
    }

    fn insert(&mut self, name: String, chord: Chord) {
        self.names.insert(chord.hash_key(), name.clone());
        self.chords.insert(name, chord);
    }

    pub fn chord_for_name(&self, name: &str) -> Option<&Chord> {
        self.chords.get(name)
    }

    /// The name of the chord's OP class, if any template reduces to it.
    pub fn name_for_chord(&self, chord: &Chord) -> Option<&str> {
        self.names
            .get(&self.space.e_op(chord).hash_key())
            .map(String::as_str)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

/// Spells a template over `root`, one voice per pitch name.
fn spell(root: f64, pitches: &str, name: &str) -> Result<Chord> {
    let pitches = pitches
        .split_whitespace()
        .map(|pitch| {
            pitch_class_for_name(pitch)
                .map(|pitch_class| root + pitch_class)
                .ok_or_else(|| ChordSpaceError::UnknownPitchName(pitch.to_string()))
        })
        .collect::<Result<Vec<f64>>>()?;
    if pitches.is_empty() {
        return Err(ChordSpaceError::EmptyTemplate(name.to_string()));
    }
    Ok(Chord::from(pitches))
}

/// Looks up a chord by name in the global table.
pub fn chord_for_name(name: &str) -> Option<&'static Chord> {
    ChordNameTable::global().chord_for_name(name)
}

/// Names a chord using the global table.
pub fn name_for_chord(chord: &Chord) -> Option<&'static str> {
    ChordNameTable::global().name_for_chord(chord)
}
