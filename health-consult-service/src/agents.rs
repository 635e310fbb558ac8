use rig::{agent::Agent, client::CompletionClient, providers::openrouter};
use tracing::warn;

use crate::config::Config;
use crate::tools::{ScrapeWebsiteTool, WebSearchTool};

/// A static agent role as plain data: who the agent is, what it is for,
/// and the background the model is primed with.
#[derive(Debug, Clone, Copy)]
pub struct AgentProfile {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

pub const DIAGNOSTICIAN: AgentProfile = AgentProfile {
    role: "Diagnosticador Médico",
    goal: "Analise os sintomas do paciente e o histórico médico para fornecer um diagnóstico \
           preliminar.",
    backstory: "Este agente é especializado no diagnóstico de condições médicas com base nos \
                sintomas relatados pelo paciente e no histórico médico. Ele usa algoritmos \
                avançados e conhecimento médico para identificar possíveis problemas de saúde.",
};

pub const TREATMENT_ADVISOR: AgentProfile = AgentProfile {
    role: "Conselheiro de Tratamento",
    goal: "Recomendar planos de tratamento apropriados com base no diagnóstico fornecido pelo \
           médico diagnosticador em português.",
    backstory: "Este agente é especializado na criação de planos de tratamento adaptados às \
                necessidades individuais do paciente. Ele considera o diagnóstico, o histórico \
                do paciente e as melhores práticas atuais da medicina para recomendar \
                tratamentos eficazes.",
};

/// Bind a profile to the shared OpenRouter model client, with the web
/// search and page-scrape tools attached.
pub fn build_agent(
    config: &Config,
    profile: &AgentProfile,
) -> Agent<openrouter::CompletionModel> {
    let client = openrouter::Client::new(&config.openrouter_api_key);

    let preamble = format!(
        "{}\n\nObjetivo: {}\n\n{}",
        profile.role, profile.goal, profile.backstory
    );

    let builder = client
        .agent(&config.model)
        .preamble(&preamble)
        .tool(ScrapeWebsiteTool::new());

    match &config.serper_api_key {
        Some(key) => builder.tool(WebSearchTool::new(key.clone())).build(),
        None => {
            warn!("SERPER_API_KEY not set; agents run without the web search tool");
            builder.build()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_non_empty() {
        for profile in [DIAGNOSTICIAN, TREATMENT_ADVISOR] {
            assert!(!profile.role.is_empty());
            assert!(!profile.goal.is_empty());
            assert!(!profile.backstory.is_empty());
        }
    }
}
