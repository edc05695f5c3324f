//! Canned analysis of a sample part-time employment contract.
//! Served by `DemoAnalyzer` so the whole flow runs without an API key.

use crate::analysis::models::{AnalysisResult, RiskClause, Severity};

const DEMO_CONTRACT: &str = "근로계약서

1. 근로계약기간: 2024년 1월 1일 ~ 2024년 12월 31일

2. 근무장소: 서울시 강남구 테헤란로 123, ABC 주식회사

3. 업무내용: 매장 판매 및 고객 응대

4. 근로시간: 09:00 ~ 21:00 (휴게시간 별도 협의)

5. 임금
   - 시급: 9,860원
   - 임금지급일: 익월 15일
   - 지급방법: 계좌이체

6. 휴일: 주 1일 (사업장 사정에 따라 변경 가능)

7. 해고: 회사는 업무상 필요에 따라 근로자를 즉시 해고할 수 있다.

8. 기타사항
   - 근로자는 업무상 발생한 손해에 대해 전액 배상해야 한다.
   - 퇴직 후 1년간 동종업계 취업을 금지한다.

본인은 위 근로조건을 확인하고 이에 동의합니다.

2024년 1월 1일
근로자: _____________ (서명)
사용자: ABC 주식회사 대표 홍길동 (인)";

fn clause(
    id: &str,
    text: &str,
    severity: Severity,
    summary: &str,
    reference: &str,
    article: &str,
    explanation: &str,
    script: &str,
) -> RiskClause {
    RiskClause {
        clause_id: id.to_string(),
        original_text: text.to_string(),
        risk_level: severity,
        issue_summary: summary.to_string(),
        legal_reference: reference.to_string(),
        legal_article: article.to_string(),
        simple_explanation: explanation.to_string(),
        negotiation_script: script.to_string(),
    }
}

pub fn demo_result() -> AnalysisResult {
    let risk_clauses = vec![
        clause(
            "risk_1",
            "09:00 ~ 21:00 (휴게시간 별도 협의)",
            Severity::High,
            "12시간 근무에 휴게시간이 정해지지 않음",
            "근로기준법 제54조",
            "사용자는 근로시간이 4시간인 경우에는 30분 이상, 8시간인 경우에는 1시간 이상의 휴게시간을 근로시간 도중에 주어야 한다.",
            "12시간 근무라면 휴게시간이 법으로 보장되어야 해요. '별도 협의'는 쉬는 시간을 안 줄 수도 있다는 뜻이에요.",
            "휴게시간이 '별도 협의'로 되어 있는데, 근로기준법 제54조에 따라 구체적인 휴게시간을 계약서에 적어 주실 수 있을까요?",
        ),
        clause(
            "risk_2",
            "회사는 업무상 필요에 따라 근로자를 즉시 해고할 수 있다.",
            Severity::High,
            "즉시 해고 조항 - 해고 예고 의무 위반",
            "근로기준법 제26조",
            "사용자는 근로자를 해고하려면 적어도 30일 전에 예고를 하여야 하고, 30일 전에 예고를 하지 아니하였을 때에는 30일분 이상의 통상임금을 지급하여야 한다.",
            "회사가 마음대로 바로 해고할 수 있다는 조항이에요. 30일 전에 알려주거나 30일치 임금을 줘야 해요.",
            "근로기준법 제26조에 따라 해고 시 30일 전 예고 또는 30일분 통상임금 지급이 필요합니다. 이 부분을 법에 맞게 수정해 주실 수 있을까요?",
        ),
        clause(
            "risk_3",
            "근로자는 업무상 발생한 손해에 대해 전액 배상해야 한다.",
            Severity::Medium,
            "과도한 손해배상 조항",
            "민법 제398조, 근로기준법 제20조",
            "근로기준법 제20조: 사용자는 근로계약 불이행에 대한 위약금 또는 손해배상액을 예정하는 계약을 체결하지 못한다.",
            "일하다 생긴 손해를 전부 물어내라는 조항이에요. 고의나 중대한 과실이 아니면 전액을 물릴 수 없어요.",
            "손해배상 조항의 '전액 배상'은 고의나 중과실이 있는 경우로 한정해 주실 수 있을까요?",
        ),
        clause(
            "risk_4",
            "주 1일 (사업장 사정에 따라 변경 가능)",
            Severity::Medium,
            "휴일이 사업장 사정에 따라 바뀔 수 있음",
            "근로기준법 제55조",
            "사용자는 근로자에게 1주에 평균 1회 이상의 유급휴일을 보장하여야 한다.",
            "주휴일은 보장되지만 '사정에 따라 변경'이라는 표현 때문에 쉬는 날이 불규칙해질 수 있어요.",
            "휴일을 바꿀 때는 최소 며칠 전에 알려주신다는 내용을 추가해 주실 수 있을까요?",
        ),
        clause(
            "risk_5",
            "퇴직 후 1년간 동종업계 취업을 금지한다.",
            Severity::Low,
            "경업금지 조항 - 직업선택의 자유 제한",
            "헌법 제15조",
            "모든 국민은 직업선택의 자유를 가진다.",
            "퇴직 후 비슷한 업종에 취업하지 못하게 하는 조항이에요. 아르바이트 수준에서는 보통 효력이 없어요.",
            "제 업무 수준에서 경업금지 조항이 꼭 필요한지 여쭤봐도 될까요?",
        ),
    ];

    AnalysisResult {
        extracted_text: DEMO_CONTRACT.to_string(),
        risk_clauses,
        overall_risk_level: "high".to_string(),
        summary: "총 5개의 위험 조항이 발견되었습니다. 특히 휴게시간과 해고 관련 조항을 꼭 확인하세요!"
            .to_string(),
        missing_clauses: vec![
            "연차휴가에 대한 규정이 없습니다 (근로기준법 제60조)".to_string(),
            "연장근로수당에 대한 규정이 없습니다 (근로기준법 제56조)".to_string(),
            "4대 보험 가입 여부가 명시되지 않았습니다".to_string(),
        ],
    }
}
