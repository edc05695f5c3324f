// Labor-law chat prompt templates.

use crate::llm_client::prompts::{KOREAN_ONLY_INSTRUCTION, LABOR_LAW_EXPERT};

pub const CHAT_SYSTEM_BODY: &str = "\
사용자의 질문에 친절하고 정확하게 답변해주세요.

답변 시:
1. 관련 법조항을 명확히 인용하세요
2. 쉬운 말로 설명하세요
3. 가능하면 실제 예시를 들어 설명하세요

답변 형식:
📌 **핵심 답변**: (한 문장 요약)

⚖️ **법적 근거**:
(관련 법조항 인용)

🗣️ **쉬운 설명**:
(일반인이 이해하기 쉽게 풀어서 설명)";

pub fn chat_system_prompt() -> String {
    format!("{LABOR_LAW_EXPERT}\n{CHAT_SYSTEM_BODY}\n\n{KOREAN_ONLY_INSTRUCTION}")
}

/// Question first, then the optional contract, then numbered reference material.
pub fn chat_user_prompt(question: &str, contract_text: &str, sources: &[String]) -> String {
    let mut prompt = format!("질문: {question}\n\n");

    if !contract_text.trim().is_empty() {
        prompt.push_str(&format!("계약서 내용:\n{contract_text}\n\n"));
    }

    if !sources.is_empty() {
        prompt.push_str("참고 자료:\n");
        for (i, source) in sources.iter().enumerate() {
            prompt.push_str(&format!("\n[자료 {}]\n{}\n", i + 1, source));
        }
    }

    prompt
}
