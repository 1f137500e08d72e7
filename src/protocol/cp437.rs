//! # Code Page 437 Table
//!
//! IBM PC code page 437, the character table most ESC/POS firmwares boot
//! with (printer table `ESC GS t 0`). `encoding_rs` only ships the WHATWG
//! encodings, so the upper half is mapped here by hand.
//!
//! ASCII (U+0000–U+007F) passes through unchanged.

/// Look up the CP437 byte for a character.
///
/// Returns `None` when the character has no CP437 representation; the caller
/// decides on the replacement.
pub fn lookup(ch: char) -> Option<u8> {
    if ch.is_ascii() {
        return Some(ch as u8);
    }
    upper_half(ch)
}

/// Bytes 0x80–0xFF, eight per row.
#[rustfmt::skip]
fn upper_half(ch: char) -> Option<u8> {
    let byte = match ch {
        'Ç' => 0x80, 'ü' => 0x81, 'é' => 0x82, 'â' => 0x83, 'ä' => 0x84, 'à' => 0x85, 'å' => 0x86, 'ç' => 0x87,
        'ê' => 0x88, 'ë' => 0x89, 'è' => 0x8A, 'ï' => 0x8B, 'î' => 0x8C, 'ì' => 0x8D, 'Ä' => 0x8E, 'Å' => 0x8F,
        'É' => 0x90, 'æ' => 0x91, 'Æ' => 0x92, 'ô' => 0x93, 'ö' => 0x94, 'ò' => 0x95, 'û' => 0x96, 'ù' => 0x97,
        'ÿ' => 0x98, 'Ö' => 0x99, 'Ü' => 0x9A, '¢' => 0x9B, '£' => 0x9C, '¥' => 0x9D, '₧' => 0x9E, 'ƒ' => 0x9F,
        'á' => 0xA0, 'í' => 0xA1, 'ó' => 0xA2, 'ú' => 0xA3, 'ñ' => 0xA4, 'Ñ' => 0xA5, 'ª' => 0xA6, 'º' => 0xA7,
        '¿' => 0xA8, '⌐' => 0xA9, '¬' => 0xAA, '½' => 0xAB, '¼' => 0xAC, '¡' => 0xAD, '«' => 0xAE, '»' => 0xAF,
        '░' => 0xB0, '▒' => 0xB1, '▓' => 0xB2, '│' => 0xB3, '┤' => 0xB4, '╡' => 0xB5, '╢' => 0xB6, '╖' => 0xB7,
        '╕' => 0xB8, '╣' => 0xB9, '║' => 0xBA, '╗' => 0xBB, '╝' => 0xBC, '╜' => 0xBD, '╛' => 0xBE, '┐' => 0xBF,
        '└' => 0xC0, '┴' => 0xC1, '┬' => 0xC2, '├' => 0xC3, '─' => 0xC4, '┼' => 0xC5, '╞' => 0xC6, '╟' => 0xC7,
        '╚' => 0xC8, '╔' => 0xC9, '╩' => 0xCA, '╦' => 0xCB, '╠' => 0xCC, '═' => 0xCD, '╬' => 0xCE, '╧' => 0xCF,
        '╨' => 0xD0, '╤' => 0xD1, '╥' => 0xD2, '╙' => 0xD3, '╘' => 0xD4, '╒' => 0xD5, '╓' => 0xD6, '╫' => 0xD7,
        '╪' => 0xD8, '┘' => 0xD9, '┌' => 0xDA, '█' => 0xDB, '▄' => 0xDC, '▌' => 0xDD, '▐' => 0xDE, '▀' => 0xDF,
        'α' => 0xE0, 'ß' => 0xE1, 'Γ' => 0xE2, 'π' => 0xE3, 'Σ' => 0xE4, 'σ' => 0xE5, 'µ' => 0xE6, 'τ' => 0xE7,
        'Φ' => 0xE8, 'Θ' => 0xE9, 'Ω' => 0xEA, 'δ' => 0xEB, '∞' => 0xEC, 'φ' => 0xED, 'ε' => 0xEE, '∩' => 0xEF,
        '≡' => 0xF0, '±' => 0xF1, '≥' => 0xF2, '≤' => 0xF3, '⌠' => 0xF4, '⌡' => 0xF5, '÷' => 0xF6, '≈' => 0xF7,
        '°' => 0xF8, '∙' => 0xF9, '·' => 0xFA, '√' => 0xFB, 'ⁿ' => 0xFC, '²' => 0xFD, '■' => 0xFE, '\u{00A0}' => 0xFF,
        _ => return None,
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(s: &str) -> Vec<u8> {
        s.chars().map(|ch| lookup(ch).unwrap_or(b'?')).collect()
    }

    #[test]
    fn ascii_is_identity() {
        for b in 0u8..0x80 {
            assert_eq!(lookup(b as char), Some(b));
        }
    }

    #[test]
    fn french_accents() {
        // "préparation" with é = 0x82
        assert_eq!(encode("pré"), vec![b'p', b'r', 0x82]);
        assert_eq!(lookup('ç'), Some(0x87));
        assert_eq!(lookup('à'), Some(0x85));
    }

    #[test]
    fn double_line_frame() {
        assert_eq!(encode("╔══╗"), vec![0xC9, 0xCD, 0xCD, 0xBB]);
        assert_eq!(encode("║"), vec![0xBA]);
        assert_eq!(encode("╚══╝"), vec![0xC8, 0xCD, 0xCD, 0xBC]);
    }

    #[test]
    fn shades_and_blocks() {
        assert_eq!(lookup('█'), Some(0xDB));
        assert_eq!(lookup('░'), Some(0xB0));
        assert_eq!(lookup('°'), Some(0xF8));
    }

    #[test]
    fn unmapped() {
        assert_eq!(lookup('★'), None);
        assert_eq!(lookup('ẞ'), None);
    }
}
