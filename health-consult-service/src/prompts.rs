use agent_flow::{FlowError, Result};

/// A task instruction as plain data: a parameterized description plus the
/// expected shape of the answer. Bound to an agent profile by the stage
/// that uses it.
#[derive(Debug, Clone, Copy)]
pub struct TaskTemplate {
    pub description: &'static str,
    pub expected_output: &'static str,
}

pub const DIAGNOSE_TEMPLATE: TaskTemplate = TaskTemplate {
    description: "1. Analise os sintomas do paciente ({symptoms}) e o histórico médico ({medical_history}).\n\
2. Forneça um diagnóstico preliminar com possíveis condições com base nas informações fornecidas.\n\
3. Limite o diagnóstico às condições mais prováveis.",
    expected_output: "Um diagnóstico preliminar com uma lista de possíveis condições em português.",
};

pub const TREATMENT_TEMPLATE: TaskTemplate = TaskTemplate {
    description: "1. Com base no diagnóstico, recomende planos de tratamento apropriados passo a passo.\n\
2. Considere o histórico médico do paciente ({medical_history}) e sintomas atuais ({symptoms}).\n\
3. Forneça recomendações detalhadas de tratamento, incluindo medicamentos, mudanças no estilo de vida e cuidados de acompanhamento.",
    expected_output: "Um plano de tratamento abrangente e adaptado às necessidades do paciente em português.",
};

/// Substitute `{name}` placeholders in a template.
///
/// Every placeholder in the template must be covered by `vars`; one that is
/// not means the template and the variable set disagree, which is a
/// configuration error and fails the run immediately. Only the template is
/// inspected — substituted values are free text and pass through verbatim,
/// whatever they contain.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> Result<String> {
    for token in placeholders(template) {
        if !vars.iter().any(|(name, _)| *name == token) {
            return Err(FlowError::TemplateError(format!(
                "unresolved placeholder {{{token}}} in task template"
            )));
        }
    }

    let mut rendered = template.to_string();
    for (name, value) in vars {
        rendered = rendered.replace(&format!("{{{name}}}"), value);
    }

    Ok(rendered)
}

/// Build the full prompt for a stage: rendered instructions plus the
/// expected-output description.
pub fn render_task_prompt(template: &TaskTemplate, vars: &[(&str, &str)]) -> Result<String> {
    let description = render_template(template.description, vars)?;
    Ok(format!(
        "{}\n\nResultado esperado: {}",
        description, template.expected_output
    ))
}

// Collects the `{identifier}` tokens of a template, in order of appearance.
// Only identifier-shaped tokens count as placeholders.
fn placeholders(template: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut i = 0;
    while let Some(start) = template[i..].find('{').map(|p| p + i) {
        let rest = &template[start + 1..];
        if let Some(end) = rest.find('}') {
            let candidate = &rest[..end];
            if !candidate.is_empty()
                && candidate
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                found.push(candidate.to_string());
            }
        }
        i = start + 1;
        if i >= template.len() {
            break;
        }
    }
    found
}
