use serde::{Deserialize, Serialize};

use crate::{transform, ALPHABET_LEN, SECTOR_DEGREES};

/// Which text buffer the user touched last. The other buffer is always
/// derived from this one, so the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditSource {
    #[default]
    Input,
    Output,
}

/// Complete state of the cipher disk: the normalized shift, the cosmetic
/// rotation angle, and the two linked text buffers.
///
/// All mutation goes through the operations below; each one re-derives
/// the non-authoritative buffer, so `ciphertext == transform(plaintext,
/// -shift)` (or the mirror equality when the output side is
/// authoritative) holds after every call.
#[derive(Debug, Clone, Default)]
pub struct DiskState {
    shift: u8,
    cumulative_angle: f64,
    edit_source: EditSource,
    plaintext: String,
    ciphertext: String,
}

impl DiskState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized rotation in alphabet positions, always in `[0, 32)`.
    pub fn shift(&self) -> u8 {
        self.shift
    }

    /// Total visual rotation in degrees. Unbounded: repeated rotation in
    /// one direction keeps accumulating so the rendered ring never snaps
    /// back across the 360° seam.
    pub fn cumulative_angle(&self) -> f64 {
        self.cumulative_angle
    }

    pub fn edit_source(&self) -> EditSource {
        self.edit_source
    }

    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    /// Rotates the outer ring by one position. `direction` is `-1` or
    /// `+1`; anything else is clamped to its sign, zero is a no-op.
    pub fn rotate(&mut self, direction: i32) {
        let step = direction.signum();
        if step == 0 {
            return;
        }
        let len = ALPHABET_LEN as i32;
        self.shift = (self.shift as i32 + step).rem_euclid(len) as u8;
        self.cumulative_angle += step as f64 * SECTOR_DEGREES;
        self.derive();
    }

    /// Returns shift and visual angle to zero and re-derives the text.
    pub fn reset(&mut self) {
        self.shift = 0;
        self.cumulative_angle = 0.0;
        self.derive();
    }

    /// Replaces the plaintext buffer, making it authoritative.
    pub fn edit_plaintext(&mut self, text: impl Into<String>) {
        self.plaintext = text.into();
        self.edit_source = EditSource::Input;
        self.derive();
    }

    /// Replaces the ciphertext buffer, making it authoritative.
    pub fn edit_ciphertext(&mut self, text: impl Into<String>) {
        self.ciphertext = text.into();
        self.edit_source = EditSource::Output;
        self.derive();
    }

    /// Empties both buffers and hands authority back to the input side.
    /// Shift and visual angle are untouched.
    pub fn clear(&mut self) {
        self.plaintext.clear();
        self.ciphertext.clear();
        self.edit_source = EditSource::Input;
    }

    /// Recomputes the derived buffer from the authoritative one.
    ///
    /// Encoding runs the transform with `-shift`, decoding with `+shift`;
    /// swapping the signs would break round-tripping. The authoritative
    /// buffer is case-folded in place (a zero-shift transform), so both
    /// fields always show uppercase.
    fn derive(&mut self) {
        let shift = self.shift as i32;
        match self.edit_source {
            EditSource::Input => {
                self.plaintext = transform(&self.plaintext, 0);
                self.ciphertext = transform(&self.plaintext, -shift);
            }
            EditSource::Output => {
                self.ciphertext = transform(&self.ciphertext, 0);
                self.plaintext = transform(&self.ciphertext, shift);
            }
        }
    }
}
