/// Script-level detection used to tell whether text still needs translating
/// before the English keyword tables can apply.
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn detect_scripts(text: &str) -> Vec<String> {
        let mut scripts = Vec::new();

        let checks: [(&str, fn(char) -> bool); 7] = [
            ("Japanese", Self::is_kana),
            ("Chinese", Self::is_cjk),
            ("Korean", Self::is_hangul),
            ("Arabic", Self::is_arabic),
            ("Cyrillic", Self::is_cyrillic),
            ("Thai", Self::is_thai),
            ("Hebrew", Self::is_hebrew),
        ];

        for (name, check) in checks {
            if text.chars().any(check) {
                scripts.push(name.to_string());
            }
        }

        scripts
    }

    /// Latin-script text with accented letters typical of French, Spanish,
    /// German or Portuguese.
    pub fn has_non_english_latin(text: &str) -> bool {
        text.chars().any(|c| {
            matches!(c,
                'à'..='ö' | 'ø'..='ÿ' | 'À'..='Ö' | 'Ø'..='Þ' | 'ß' | 'œ' | 'Œ'
            )
        })
    }

    pub fn likely_english(text: &str) -> bool {
        Self::detect_scripts(text).is_empty() && !Self::has_non_english_latin(text)
    }

    fn is_kana(c: char) -> bool {
        matches!(c,
            '\u{3040}'..='\u{309F}' |  // Hiragana
            '\u{30A0}'..='\u{30FF}'    // Katakana
        )
    }

    fn is_cjk(c: char) -> bool {
        matches!(c,
            '\u{4E00}'..='\u{9FAF}' |  // CJK Unified Ideographs
            '\u{3400}'..='\u{4DBF}'    // CJK Extension A
        )
    }

    fn is_hangul(c: char) -> bool {
        matches!(c,
            '\u{AC00}'..='\u{D7AF}' |
            '\u{1100}'..='\u{11FF}' |
            '\u{3130}'..='\u{318F}'
        )
    }

    fn is_arabic(c: char) -> bool {
        matches!(c, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}')
    }

    fn is_cyrillic(c: char) -> bool {
        matches!(c, '\u{0400}'..='\u{052F}')
    }

    fn is_thai(c: char) -> bool {
        matches!(c, '\u{0E00}'..='\u{0E7F}')
    }

    fn is_hebrew(c: char) -> bool {
        matches!(c, '\u{0590}'..='\u{05FF}')
    }
}
