/// Maps text to the display's character ROM. U+0008..U+000F address the
/// eight custom characters, unmappable characters become a space.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

fn encode_char(c: char) -> u8 {
    match c {
        '\u{8}'..='\u{f}' => c as u8,
        '\\' => b' ',
        ' '..='}' => c as u8,
        '¥' => 0x5C,
        '→' => 0x7E,
        '←' => 0x7F,
        '°' => 0xDF,
        'ä' | 'Ä' => 0xE1,
        'ß' | 'β' => 0xE2,
        'ε' => 0xE3,
        'µ' | 'μ' => 0xE4,
        'σ' => 0xE5,
        'ρ' => 0xE6,
        '√' => 0xE8,
        '¢' => 0xEC,
        'ñ' | 'Ñ' => 0xEE,
        'ö' | 'Ö' => 0xEF,
        'θ' => 0xF2,
        '∞' => 0xF3,
        'Ω' => 0xF4,
        'ü' | 'Ü' => 0xF5,
        'Σ' => 0xF6,
        'π' => 0xF7,
        '÷' => 0xFD,
        '█' => 0xFF,
        _ => b' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(encode("Temp: 21C"), b"Temp: 21C".to_vec());
    }

    #[test]
    fn test_custom_character_slots() {
        assert_eq!(encode("\u{8}\u{f}"), vec![0x08, 0x0F]);
    }

    #[test]
    fn test_symbols_use_rom_codes() {
        assert_eq!(encode("21°"), vec![b'2', b'1', 0xDF]);
        assert_eq!(encode("Grüße"), vec![b'G', b'r', 0xF5, 0xE2, b'e']);
    }

    #[test]
    fn test_unmappable_becomes_space() {
        assert_eq!(encode("a~b"), vec![b'a', b' ', b'b']);
        assert_eq!(encode("\\"), vec![b' ']);
        assert_eq!(encode("漢"), vec![b' ']);
    }
}
