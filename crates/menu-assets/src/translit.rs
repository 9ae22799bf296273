//! Cyrillic-to-Latin transliteration.
//!
//! Menu item names arrive in Russian; asset keys are Latin. Each
//! recognized letter maps to one fixed Latin equivalent, so the mapping
//! is deterministic and idempotent (Latin input passes through).

/// Fixed Latin equivalent for one recognized Cyrillic letter.
///
/// Returns `None` for characters outside the table; the caller decides
/// how to treat those (the key pipeline turns them into separators).
pub fn latin_equivalent(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latinize(text: &str) -> String {
        text.chars()
            .map(|c| latin_equivalent(c).map(str::to_string).unwrap_or(c.to_string()))
            .collect()
    }

    #[test]
    fn common_menu_words() {
        assert_eq!(latinize("капучино"), "kapuchino");
        assert_eq!(latinize("кофе"), "kofe");
        assert_eq!(latinize("эспрессо"), "espresso");
        assert_eq!(latinize("чай"), "chay");
        assert_eq!(latinize("латте"), "latte");
        assert_eq!(latinize("раф"), "raf");
    }

    #[test]
    fn silent_signs_vanish() {
        assert_eq!(latinize("объем"), "obem");
        assert_eq!(latinize("карамель"), "karamel");
    }

    #[test]
    fn unrecognized_characters_are_left_to_the_caller() {
        assert_eq!(latin_equivalent('a'), None);
        assert_eq!(latin_equivalent('7'), None);
        assert_eq!(latin_equivalent('-'), None);
        assert_eq!(latin_equivalent('λ'), None);
    }
}
