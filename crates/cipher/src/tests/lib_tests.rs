use super::*;

#[test]
fn alphabet_has_thirty_two_distinct_symbols() {
    assert_eq!(ALPHABET_LEN, 32);
    for (i, ch) in ALPHABET.iter().enumerate() {
        assert_eq!(position(*ch), Some(i), "duplicate or misplaced {ch}");
    }
    assert!((SECTOR_DEGREES - 11.25).abs() < f64::EPSILON);
}

#[test]
fn zero_shift_is_uppercase_identity() {
    assert_eq!(transform("привіт, світе!", 0), "ПРИВІТ, СВІТЕ!");
    assert_eq!(transform("ЩЕДРИК", 0), "ЩЕДРИК");
    assert_eq!(transform("", 0), "");
}

#[test]
fn round_trips_for_every_shift() {
    let plain = "ЗАХІДСОНЦЯ";
    for k in 0..ALPHABET_LEN as i32 {
        let encoded = transform(plain, k);
        assert_eq!(transform(&encoded, -k), plain, "shift {k}");
    }
}

#[test]
fn non_alphabet_characters_pass_through() {
    for k in [-5, 0, 1, 17, 31, 64] {
        assert_eq!(transform("1984 ... !?", k), "1984 ... !?");
        // Latin letters are outside the disk alphabet entirely.
        assert_eq!(transform("XYZ", k), "XYZ");
    }
}

#[test]
fn negative_shift_wraps_with_true_modulo() {
    // 'А' is position 0; one step backwards lands on the last symbol.
    assert_eq!(transform("А", -1), "Я");
    assert_eq!(transform("А", -33), "Я");
    assert_eq!(transform("Я", 1), "А");
}

#[test]
fn shift_is_periodic_in_alphabet_length() {
    let text = "ГЕТЬМАН";
    assert_eq!(transform(text, 5), transform(text, 5 + 32));
    assert_eq!(transform(text, -3), transform(text, 29));
}

mod disk_state {
    use super::*;

    #[test]
    fn starts_at_zero_shift_with_input_authoritative() {
        let state = DiskState::new();
        assert_eq!(state.shift(), 0);
        assert_eq!(state.cumulative_angle(), 0.0);
        assert_eq!(state.edit_source(), EditSource::Input);
        assert!(state.plaintext().is_empty());
        assert!(state.ciphertext().is_empty());
    }

    #[test]
    fn rotate_wraps_shift_but_accumulates_angle() {
        let mut state = DiskState::new();
        for _ in 0..32 {
            state.rotate(1);
        }
        assert_eq!(state.shift(), 0);
        assert!((state.cumulative_angle() - 360.0).abs() < 1e-9);

        state.rotate(-1);
        assert_eq!(state.shift(), 31);
        assert!((state.cumulative_angle() - 348.75).abs() < 1e-9);
    }

    #[test]
    fn sign_convention_matches_the_disk() {
        // Shift 1: plaintext 'А' (position 0) encodes to the last symbol.
        let mut state = DiskState::new();
        state.rotate(1);
        state.edit_plaintext("А");
        assert_eq!(state.ciphertext(), "Я");

        // Editing that ciphertext back must reproduce 'А'.
        state.edit_ciphertext("Я");
        assert_eq!(state.plaintext(), "А");
    }

    #[test]
    fn rotation_rederives_from_the_authoritative_buffer() {
        let mut state = DiskState::new();
        state.edit_plaintext("БАК");
        assert_eq!(state.ciphertext(), "БАК");

        state.rotate(1);
        assert_eq!(state.plaintext(), "БАК");
        assert_eq!(state.ciphertext(), "АЯЙ");

        // With the output side authoritative the plaintext follows instead.
        state.edit_ciphertext("АЯЙ");
        state.rotate(1);
        assert_eq!(state.ciphertext(), "АЯЙ");
        assert_eq!(state.plaintext(), "ВБЛ");
    }

    #[test]
    fn lowercase_edits_show_uppercase_in_both_buffers() {
        let mut state = DiskState::new();
        state.edit_plaintext("мир");
        assert_eq!(state.plaintext(), "МИР");
        assert_eq!(state.ciphertext(), "МИР");

        state.edit_ciphertext("мир");
        assert_eq!(state.ciphertext(), "МИР");
        assert_eq!(state.plaintext(), "МИР");
    }

    #[test]
    fn clear_keeps_shift_and_resets_edit_source() {
        let mut state = DiskState::new();
        state.rotate(1);
        state.rotate(1);
        state.edit_ciphertext("ЗИМА");
        state.clear();

        assert!(state.plaintext().is_empty());
        assert!(state.ciphertext().is_empty());
        assert_eq!(state.edit_source(), EditSource::Input);
        assert_eq!(state.shift(), 2);
        assert!((state.cumulative_angle() - 22.5).abs() < 1e-9);
    }

    #[test]
    fn reset_zeroes_shift_and_angle() {
        let mut state = DiskState::new();
        for _ in 0..5 {
            state.rotate(1);
        }
        state.edit_plaintext("ДНІПРО");
        state.reset();

        assert_eq!(state.shift(), 0);
        assert_eq!(state.cumulative_angle(), 0.0);
        // Zero shift: derived text equals the (folded) authoritative text.
        assert_eq!(state.ciphertext(), "ДНІПРО");
    }
}
