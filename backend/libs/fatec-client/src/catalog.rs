/// FATEC Cotia course catalog
///
/// Static content shown on the education screen and embedded in the
/// assistant's system prompt.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Course {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    /// Topics listed for the assistant
    pub topics: &'static str,
    pub image_url: &'static str,
    pub light_accent: &'static str,
    pub dark_accent: &'static str,
}

impl Course {
    pub fn accent(&self, dark: bool) -> &'static str {
        if dark {
            self.dark_accent
        } else {
            self.light_accent
        }
    }
}

pub static COURSES: [Course; 6] = [
    Course {
        id: 1,
        title: "Ciência de Dados",
        description: "Domine Python, estatística e machine learning. Transforme dados brutos em insights estratégicos para tomada de decisões.",
        topics: "Python, estatística, machine learning, análise de dados",
        image_url: "https://cdn-icons-png.flaticon.com/512/4324/4324895.png",
        light_accent: "#ff6b6b",
        dark_accent: "#4fc3f7",
    },
    Course {
        id: 2,
        title: "Comércio Exterior",
        description: "Logística internacional, processos de importação/exportação, câmbio e estratégias de mercado global.",
        topics: "logística internacional, importação/exportação, câmbio",
        image_url: "https://cdn-icons-png.flaticon.com/512/1041/1041880.png",
        light_accent: "#ffa726",
        dark_accent: "#7c4dff",
    },
    Course {
        id: 3,
        title: "Desenvolvimento de Software Multiplataforma",
        description: "Crie aplicações web, mobile e desktop. JavaScript, React Native, APIs REST e design de interfaces modernas.",
        topics: "web/mobile/desktop, JS, React Native, APIs",
        image_url: "https://cdn-icons-png.flaticon.com/512/2721/2721290.png",
        light_accent: "#ff7043",
        dark_accent: "#00bcd4",
    },
    Course {
        id: 4,
        title: "Design de Produto",
        description: "Modelagem 3D, prototipagem rápida e design industrial. Do conceito à manufatura com foco em inovação.",
        topics: "modelagem 3D, prototipagem, design industrial",
        image_url: "https://cdn-icons-png.flaticon.com/512/1829/1829448.png",
        light_accent: "#ec407a",
        dark_accent: "#26c6da",
    },
    Course {
        id: 5,
        title: "Gestão da Produção Industrial",
        description: "Otimize processos produtivos com Lean Manufacturing, Six Sigma, qualidade total e automação industrial.",
        topics: "Lean, Six Sigma, qualidade, automação",
        image_url: "https://cdn-icons-png.flaticon.com/512/3135/3135755.png",
        light_accent: "#ff6b6b",
        dark_accent: "#4fc3f7",
    },
    Course {
        id: 6,
        title: "Gestão Empresarial",
        description: "Planejamento estratégico, finanças corporativas, marketing digital e liderança orientada por dados e resultados.",
        topics: "estratégia, finanças, marketing, liderança",
        image_url: "https://cdn-icons-png.flaticon.com/512/5956/5956593.png",
        light_accent: "#ffa726",
        dark_accent: "#7c4dff",
    },
];

pub fn find(id: u32) -> Option<&'static Course> {
    COURSES.iter().find(|course| course.id == id)
}

/// One `Title: topics.` line per course, blank-line separated
pub fn prompt_summary() -> String {
    COURSES
        .iter()
        .map(|course| format!("{}: {}.", course.title, course.topics))
        .collect::<Vec<_>>()
        .join("\n\n")
}
