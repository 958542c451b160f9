//! Content compiled into the binary.
//!
//! Served whenever no persisted document exists yet (first run, or after the
//! data file was removed).  Once an operator saves from the admin panel the
//! file on disk takes over for good.

use super::schema::{
    Certification, CodeExample, ExperienceEntry, Learning, Metric, PersonalInfo, PortfolioConfig,
    ProjectInfo, TechItem,
};

const CODE_EXAMPLE: &str = "Feature: Login do Sistema

Scenario: Login com sucesso
  Given que estou na página de login
  When eu preencho \"usuario@email.com\"
  And eu preencho a senha \"***\"
  And eu clico no botão \"Entrar\"
  Then devo ver o dashboard";

/// Returns the embedded default portfolio.
pub fn embedded_portfolio() -> PortfolioConfig {
    PortfolioConfig {
        personal: PersonalInfo {
            first_name: "Matheus".into(),
            last_name: "Ferreira".into(),
            role: "QA Engineer".into(),
            tagline: "<QA Engineer />".into(),
            description: "Engenheiro de QA especializado em automação inteligente e soluções de teste com IA. Transformando qualidade em excelência.".into(),
            status_badge: "Available for Projects".into(),
            email: "contato@email.com".into(),
            phone: "5522988741592".into(),
            linkedin: "https://www.linkedin.com/in/matheus-ferreira-57380271/".into(),
            github: "https://github.com/".into(),
            location: Some("Rio de Janeiro, Brasil".into()),
        },
        project: ProjectInfo {
            name: "BDD_PyTech".into(),
            subtitle: "Assistente Automatizador".into(),
            description: "Uma solução revolucionária de IA e Automação que converte interações do navegador diretamente em cenários Gherkin/BDD prontos para execução. Acelere a criação de testes automatizados em até 10x.".into(),
            features: vec![
                "Chrome Extension".into(),
                "AI Integration".into(),
                "Gherkin Output".into(),
                "One-Click Export".into(),
            ],
            code_example: CodeExample {
                filename: "bdd_pytech_output.feature".into(),
                content: CODE_EXAMPLE.into(),
            },
        },
        tech_stack: [
            ("Cypress", "TestTube2"),
            ("Selenium", "Globe"),
            ("Playwright", "Terminal"),
            ("Gherkin/BDD", "Code2"),
            ("Python", "Cpu"),
            ("TypeScript", "Code2"),
            ("AI Prompts", "BrainCircuit"),
            ("REST APIs", "Zap"),
        ]
        .into_iter()
        .map(|(name, icon)| TechItem {
            name: name.into(),
            icon: icon.into(),
        })
        .collect(),
        experience: vec![
            ExperienceEntry {
                year: "2023 - Presente".into(),
                title: "QA Engineer".into(),
                company: "NTT Data".into(),
                description: "Liderança em automação de testes com Cypress e Selenium. Desenvolvimento de frameworks de teste e integração com pipelines CI/CD. Implementação de testes de API e performance.".into(),
                is_active: true,
            },
            ExperienceEntry {
                year: "2022 - 2023".into(),
                title: "QA Analyst".into(),
                company: "NTT Data".into(),
                description: "Análise e execução de testes funcionais e de regressão. Documentação de casos de teste em Gherkin/BDD. Colaboração com times de desenvolvimento ágil.".into(),
                is_active: false,
            },
            ExperienceEntry {
                year: "2021 - 2022".into(),
                title: "QA Trainee".into(),
                company: "NTT Data".into(),
                description: "Introdução às práticas de QA e metodologias de teste. Aprendizado de ferramentas de automação e boas práticas de desenvolvimento de software.".into(),
                is_active: false,
            },
        ],
        certifications: vec![
            Certification {
                name: "CTFL - Certified Tester Foundation Level".into(),
                issuer: "ISTQB".into(),
                year: "2023".into(),
                credential_url: Some(String::new()),
            },
            Certification {
                name: "Cypress Automation Testing".into(),
                issuer: "Udemy".into(),
                year: "2022".into(),
                credential_url: Some(String::new()),
            },
        ],
        qualifications: Vec::new(),
        learning: Learning {
            title: "Always Learning".into(),
            subtitle: "Inglês em Aperfeiçoamento".into(),
            progress: 70,
            level: "Nível Intermediário-Avançado".into(),
        },
        metrics: vec![
            Metric {
                value: "500+".into(),
                label: "Casos de Teste Automatizados".into(),
            },
            Metric {
                value: "3+".into(),
                label: "Anos de Experiência".into(),
            },
            Metric {
                value: "100%".into(),
                label: "Comprometimento".into(),
            },
        ],
    }
}
