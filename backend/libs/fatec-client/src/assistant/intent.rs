/// Keyword intent classification
///
/// Rules are tried in order against the lower-cased input; the first match
/// wins and no match yields [`IntentLabel::General`]. Admissions and
/// employment come before courses, so "curso" never shadows them.
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentLabel {
    Admissions,
    Employment,
    Courses,
    Security,
    Culture,
    Contact,
    General,
}

impl IntentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentLabel::Admissions => "admissions",
            IntentLabel::Employment => "employment",
            IntentLabel::Courses => "courses",
            IntentLabel::Security => "security",
            IntentLabel::Culture => "culture",
            IntentLabel::Contact => "contact",
            IntentLabel::General => "general",
        }
    }

    /// Topic description used inside the system prompt
    pub fn topic(&self) -> &'static str {
        match self {
            IntentLabel::Admissions => "ingresso, vestibular e vida acadêmica",
            IntentLabel::Employment => "empregos, estágios e mercado de trabalho",
            IntentLabel::Courses => "cursos e disciplinas da FATEC",
            IntentLabel::Security => "segurança digital",
            IntentLabel::Culture => "eventos culturais",
            IntentLabel::Contact => "contato e localização da FATEC Cotia",
            IntentLabel::General => "assunto geral",
        }
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static RULES: Lazy<Vec<(Regex, IntentLabel)>> = Lazy::new(|| {
    [
        (
            r"\b(vestibular|matr[ií]cula|inscri[çc][ãa]o|processo seletivo|ingresso|calend[áa]rio|nota|prova|semestre|transfer[êe]ncia)",
            IntentLabel::Admissions,
        ),
        (
            r"\b(empregos?|vagas?|est[áa]gios?|trabalh|carreira|sal[áa]rio|mercado)",
            IntentLabel::Employment,
        ),
        (
            r"\b(cursos?|disciplina|grade|ci[êe]ncia de dados|com[ée]rcio exterior|software|design de produto|gest[ãa]o)",
            IntentLabel::Courses,
        ),
        (
            r"\b(seguran[çc]a|golpe|senha|phishing|privacidade|v[íi]rus)",
            IntentLabel::Security,
        ),
        (
            r"\b(cultura|eventos?|palestra|festa|semana|exposi[çc][ãa]o|show)",
            IntentLabel::Culture,
        ),
        (
            r"\b(contato|telefone|e-?mail|endere[çc]o|hor[áa]rio|localiza[çc][ãa]o|whatsapp)",
            IntentLabel::Contact,
        ),
    ]
    .into_iter()
    .map(|(pattern, label)| {
        let regex = Regex::new(pattern).expect("intent pattern must compile");
        (regex, label)
    })
    .collect()
});

pub fn classify(input: &str) -> IntentLabel {
    let text = input.to_lowercase();
    RULES
        .iter()
        .find(|(regex, _)| regex.is_match(&text))
        .map(|(_, label)| *label)
        .unwrap_or(IntentLabel::General)
}
