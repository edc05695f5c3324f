// Shared prompt fragments used by more than one service.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Persona shared by the contract analyzer and the labor-law chat.
pub const LABOR_LAW_EXPERT: &str = "당신은 한국 근로기준법 전문가입니다.";

/// Appended to every prompt whose answer is shown to end users.
pub const KOREAN_ONLY_INSTRUCTION: &str = "응답은 반드시 한국어로 작성하세요.";

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    반드시 유효한 JSON 객체 하나만 출력하세요. \
    JSON 바깥의 텍스트, 마크다운 코드 펜스, 설명을 포함하지 마세요.";
