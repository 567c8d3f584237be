//! UI string dictionary.
//!
//! Only interface chrome goes through here. Missing keys render as the key
//! itself so a gap in a dictionary never breaks the output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported UI languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Uk,
    Fr,
    En,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Uk, Language::Fr, Language::En];

    /// Interpret a language tag such as `fr`, `en-US` or `uk_UA.UTF-8`.
    /// Unknown tags fall back to the default.
    pub fn from_tag(tag: &str) -> Language {
        tag.parse().unwrap_or_default()
    }

    /// The first non-empty candidate, interpreted as a tag.
    pub fn detect<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Language {
        candidates
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|c| !c.is_empty())
            .map(Language::from_tag)
            .unwrap_or_default()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Uk => "uk",
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    fn dictionary(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::Uk => UK,
            Language::Fr => FR,
            Language::En => EN,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prefix: String = s.trim().chars().take(2).collect::<String>().to_lowercase();
        match prefix.as_str() {
            "uk" => Ok(Language::Uk),
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            _ => Err(format!("unknown language: {s}")),
        }
    }
}

/// Translator for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Translate a key.
    pub fn t(&self, key: &str) -> String {
        self.raw(key).to_string()
    }

    /// Translate a key and fill `{name}` placeholders. Placeholders without
    /// a value render as empty.
    pub fn t_with(&self, key: &str, vars: &[(&str, &dyn fmt::Display)]) -> String {
        let raw = self.raw(key);
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if is_placeholder_name(&after[..close]) => {
                    let name = &after[..close];
                    if let Some((_, value)) = vars.iter().find(|(k, _)| *k == name) {
                        out.push_str(&value.to_string());
                    }
                    rest = &after[close + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn raw<'a>(&self, key: &'a str) -> &'a str {
        self.language
            .dictionary()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(key)
    }
}

fn is_placeholder_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

const UK: &[(&str, &str)] = &[
    ("Subtitle", "Вправи з граматики"),
    ("Language", "Мова"),
    ("SelectSection", "Оберіть розділ"),
    ("SelectSectionPlaceholder", "— оберіть розділ —"),
    ("FooterBrand", "gapfill"),
    ("CheckAll", "Перевірити все"),
    ("Reset", "Скинути"),
    ("BackToSections", "До розділів"),
    ("OpenSectionDesc", "Відкрити вправи цього розділу"),
    ("Open", "Відкрити"),
    ("QuestionTitle", "Питання {id}"),
    ("Hint", "Підказка"),
    ("NoHint", "Підказки немає"),
    ("Check", "Перевірити"),
    ("Back", "Назад"),
    ("Correct", "Правильно"),
    ("Wrong", "Неправильно"),
    ("Expected", "Очікувано"),
    ("ProgressDoneOfTotal", "Виконано {filled} з {total}"),
    ("CorrectOfTotal", "Правильних відповідей: {correct} з {total}"),
    ("LoadSectionsError", "Не вдалося завантажити розділи: {message}"),
    ("UnknownQuestion", "Немає питання {id}"),
    ("UnknownSection", "Немає розділу {id}"),
    ("NoSectionOpen", "Спочатку відкрийте розділ"),
    ("ResetDone", "Відповіді очищено"),
    ("Sections", "Розділи"),
    ("Report", "Звіт"),
    ("Score", "Результат"),
    ("YourAnswer", "Ваша відповідь"),
    ("Status", "Статус"),
    ("PlayHelp", "Команди: list, open <id>, answer <n> <текст>, check <n>, check-all, hint <n>, reset, back, forward, home, quit"),
    ("UnknownCommand", "Невідома команда: {command}"),
];

const FR: &[(&str, &str)] = &[
    ("Subtitle", "Exercices de grammaire"),
    ("Language", "Langue"),
    ("SelectSection", "Choisissez une section"),
    ("SelectSectionPlaceholder", "— choisir une section —"),
    ("FooterBrand", "gapfill"),
    ("CheckAll", "Tout vérifier"),
    ("Reset", "Réinitialiser"),
    ("BackToSections", "Retour aux sections"),
    ("OpenSectionDesc", "Ouvrir les exercices de cette section"),
    ("Open", "Ouvrir"),
    ("QuestionTitle", "Question {id}"),
    ("Hint", "Indice"),
    ("NoHint", "Pas d'indice"),
    ("Check", "Vérifier"),
    ("Back", "Retour"),
    ("Correct", "Correct"),
    ("Wrong", "Faux"),
    ("Expected", "Attendu"),
    ("ProgressDoneOfTotal", "Fait : {filled} sur {total}"),
    ("CorrectOfTotal", "Bonnes réponses : {correct} sur {total}"),
    ("LoadSectionsError", "Impossible de charger les sections : {message}"),
    ("UnknownQuestion", "Pas de question {id}"),
    ("UnknownSection", "Pas de section {id}"),
    ("NoSectionOpen", "Ouvrez d'abord une section"),
    ("ResetDone", "Réponses effacées"),
    ("Sections", "Sections"),
    ("Report", "Rapport"),
    ("Score", "Score"),
    ("YourAnswer", "Votre réponse"),
    ("Status", "Statut"),
    ("PlayHelp", "Commandes : list, open <id>, answer <n> <texte>, check <n>, check-all, hint <n>, reset, back, forward, home, quit"),
    ("UnknownCommand", "Commande inconnue : {command}"),
];

const EN: &[(&str, &str)] = &[
    ("Subtitle", "Grammar exercises"),
    ("Language", "Language"),
    ("SelectSection", "Select a section"),
    ("SelectSectionPlaceholder", "— select a section —"),
    ("FooterBrand", "gapfill"),
    ("CheckAll", "Check all"),
    ("Reset", "Reset"),
    ("BackToSections", "Back to sections"),
    ("OpenSectionDesc", "Open this section's exercises"),
    ("Open", "Open"),
    ("QuestionTitle", "Question {id}"),
    ("Hint", "Hint"),
    ("NoHint", "No hint"),
    ("Check", "Check"),
    ("Back", "Back"),
    ("Correct", "Correct"),
    ("Wrong", "Wrong"),
    ("Expected", "Expected"),
    ("ProgressDoneOfTotal", "Done {filled} of {total}"),
    ("CorrectOfTotal", "Correct answers: {correct} of {total}"),
    ("LoadSectionsError", "Failed to load sections: {message}"),
    ("UnknownQuestion", "No question {id}"),
    ("UnknownSection", "No section {id}"),
    ("NoSectionOpen", "Open a section first"),
    ("ResetDone", "Answers cleared"),
    ("Sections", "Sections"),
    ("Report", "Report"),
    ("Score", "Score"),
    ("YourAnswer", "Your answer"),
    ("Status", "Status"),
    ("PlayHelp", "Commands: list, open <id>, answer <n> <text>, check <n>, check-all, hint <n>, reset, back, forward, home, quit"),
    ("UnknownCommand", "Unknown command: {command}"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_tags() {
        assert_eq!(Language::from_tag("fr"), Language::Fr);
        assert_eq!(Language::from_tag("en-US"), Language::En);
        assert_eq!(Language::from_tag("uk_UA.UTF-8"), Language::Uk);
        assert_eq!(Language::from_tag("FR"), Language::Fr);
        assert_eq!(Language::from_tag("de"), Language::Uk);
        assert_eq!(Language::from_tag(""), Language::Uk);
        assert!("java".parse::<Language>().is_err());
    }

    #[test]
    fn detection_takes_first_non_empty_candidate() {
        assert_eq!(Language::detect([None, Some(""), Some("en_GB")]), Language::En);
        assert_eq!(Language::detect([Some("fr"), Some("en")]), Language::Fr);
        assert_eq!(Language::detect([None, None]), Language::Uk);
        // An unsupported first choice falls back rather than trying the next one.
        assert_eq!(Language::detect([Some("de"), Some("en")]), Language::Uk);
    }

    #[test]
    fn dictionaries_share_keys() {
        for lang in Language::ALL {
            for (key, _) in EN {
                assert!(
                    lang.dictionary().iter().any(|(k, _)| k == key),
                    "{lang} is missing {key}"
                );
            }
        }
    }

    #[test]
    fn missing_key_returns_key() {
        let i18n = I18n::new(Language::Fr);
        assert_eq!(i18n.t("NoSuchKey"), "NoSuchKey");
        assert_eq!(i18n.t("Check"), "Vérifier");
    }

    #[test]
    fn placeholders_are_filled() {
        let i18n = I18n::new(Language::En);
        assert_eq!(
            i18n.t_with("ProgressDoneOfTotal", &[("filled", &1), ("total", &3)]),
            "Done 1 of 3"
        );
        assert_eq!(i18n.t_with("ProgressDoneOfTotal", &[("filled", &2)]), "Done 2 of ");
        assert_eq!(
            i18n.t_with("Literal {not a placeholder}", &[]),
            "Literal {not a placeholder}"
        );
    }
}
