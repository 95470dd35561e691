//! Free-tier model registry for the OpenRouter backend.

/// Model the client starts with when nothing was selected
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat:free";

/// One selectable model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
}

/// Free-tier models offered in the model picker
pub const FREE_MODELS: &[ModelInfo] = &[
    ModelInfo { id: "meta-llama/llama-4-maverick:free", name: "Llama 4 Maverick Free" },
    ModelInfo { id: "meta-llama/llama-4-scout:free", name: "Llama 4 Scout Free" },
    ModelInfo { id: "moonshotai/kimi-vl-a3b-thinking:free", name: "Kimi VL A3B Thinking Free" },
    ModelInfo { id: "nvidia/llama-3.1-nemotron-nano-8b-v1:free", name: "Llama 3.1 Nemotron Nano 8B Free" },
    ModelInfo { id: "google/gemini-2.5-pro-exp-03-25:free", name: "Gemini 2.5 Pro Exp Free" },
    ModelInfo { id: "mistralai/mistral-small-3.1-24b-instruct:free", name: "Mistral Small 3.1 24B Free" },
    ModelInfo { id: "openrouter/openrouter-optimus-alpha:free", name: "OpenRouter Optimus Alpha Free" },
    ModelInfo { id: "openrouter/openrouter-quasar-alpha:free", name: "OpenRouter Quasar Alpha Free" },
    ModelInfo { id: "deepseek/deepseek-v3-base:free", name: "DeepSeek V3 Base Free" },
    ModelInfo { id: "qwen/qwen2.5-vl-3b-instruct:free", name: "Qwen 2.5 VL 3B Free" },
    ModelInfo { id: "deepseek/deepseek-chat-v3-0324:free", name: "DeepSeek Chat V3 Free" },
    ModelInfo { id: "deepseek/deepseek-r1-zero:free", name: "DeepSeek R1 Zero Free" },
    ModelInfo { id: "nousresearch/deephermes-3-llama-3-8b-preview:free", name: "DeepHermes 3 Llama 3 8B Free" },
    ModelInfo { id: "arcee-ai/qwq-32b-arliai-rpr-v1:free", name: "QwQ 32B ArliAI RPR V1 Free" },
    ModelInfo { id: "cognitivecomputations/dolphin3.0-mistral-24b:free", name: "Dolphin 3.0 Mistral 24B Free" },
    ModelInfo { id: "cognitivecomputations/dolphin3.0-r1-mistral-24b:free", name: "Dolphin 3.0 R1 Mistral 24B Free" },
    ModelInfo { id: "deepseek/deepseek-chat:free", name: "DeepSeek Chat Free" },
    ModelInfo { id: "deepseek/deepseek-r1-0528:free", name: "DeepSeek R1 0528 Free" },
    ModelInfo { id: "deepseek/deepseek-r1-0528-qwen3-8b:free", name: "DeepSeek R1 0528 Qwen3 8B Free" },
    ModelInfo { id: "deepseek/deepseek-r1-distill-llama-70b:free", name: "DeepSeek R1 Distill Llama 70B Free" },
    ModelInfo { id: "deepseek/deepseek-r1-distill-qwen-14b:free", name: "DeepSeek R1 Distill Qwen 14B Free" },
    ModelInfo { id: "featherless/qwerky-72b:free", name: "Qwerky 72B Free" },
    ModelInfo { id: "google/gemini-2.0-flash-exp:free", name: "Gemini 2.0 Flash Exp Free" },
    ModelInfo { id: "qwen/qwen3-8b:free", name: "Qwen 3 8B Free" },
    ModelInfo { id: "rekaai/reka-flash-3:free", name: "Reka Flash 3 Free" },
    ModelInfo { id: "sarvamai/sarvam-m:free", name: "Sarvam M Free" },
    ModelInfo { id: "shisa-ai/shisa-v2-llama3.3-70b:free", name: "Shisa V2 Llama 3.3 70B Free" },
    ModelInfo { id: "thudm/glm-4-32b:free", name: "GLM 4 32B Free" },
    ModelInfo { id: "thudm/glm-z1-32b:free", name: "GLM Z1 32B Free" },
    ModelInfo { id: "tngtech/deepseek-r1t-chimera:free", name: "DeepSeek R1T Chimera Free" },
];

/// Look up a registry entry by model id
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    FREE_MODELS.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_registered() {
        assert!(find_model(DEFAULT_MODEL).is_some());
    }

    #[test]
    fn find_model_misses_unknown_ids() {
        assert!(find_model("acme/unknown-model").is_none());
    }

    #[test]
    fn registry_ids_are_unique() {
        for (i, model) in FREE_MODELS.iter().enumerate() {
            assert!(
                !FREE_MODELS[i + 1..].iter().any(|m| m.id == model.id),
                "duplicate id {}",
                model.id
            );
        }
    }
}
