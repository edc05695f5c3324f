//! Mandatory labor-law rules the analyzer must check first.
//!
//! Any contract text matching one of these patterns is a violation of a
//! mandatory provision, regardless of what the parties agreed.

#[derive(Debug, Clone, Copy)]
pub struct MandatoryRule {
    pub rule_id: &'static str,
    pub category: &'static str,
    pub risk_pattern: &'static str,
    pub legal_reference: &'static str,
    pub explanation: &'static str,
    pub script: &'static str,
}

pub const MANDATORY_RISK_CLAUSES: [MandatoryRule; 6] = [
    MandatoryRule {
        rule_id: "mandatory_labor_01",
        category: "근로기준법 위반",
        risk_pattern: "퇴사 시 위약금이나 손해배상액을 미리 금액으로 정해둠",
        legal_reference: "근로기준법 제20조 (위약 예정의 금지)",
        explanation: "그만둔다는 이유로 미리 정한 벌금을 물리는 약정은 무효입니다. 실제 발생한 손해만 청구할 수 있습니다.",
        script: "근로기준법 제20조에 따라 근로계약 불이행에 대한 위약금 예정 약정은 무효이므로 해당 조항 삭제를 요청드립니다.",
    },
    MandatoryRule {
        rule_id: "mandatory_labor_02",
        category: "근로기준법 위반",
        risk_pattern: "연장·야간·휴일근로에 50% 가산수당이 없거나 통상임금만 지급",
        legal_reference: "근로기준법 제56조 (연장·야간 및 휴일 근로)",
        explanation: "연장, 야간(22시 이후), 휴일 근무에는 통상임금의 1.5배를 지급해야 합니다.",
        script: "근로기준법 제56조에 따라 연장·야간·휴일근로에는 통상임금의 50%를 가산해 지급해 주셔야 합니다.",
    },
    MandatoryRule {
        rule_id: "mandatory_wage_01",
        category: "최저임금법 위반",
        risk_pattern: "시급 환산 시 법정 최저임금(2025년 10,030원)보다 낮음",
        legal_reference: "최저임금법 제6조 (최저임금의 효력)",
        explanation: "월급을 근무시간으로 나눈 금액이 최저시급보다 낮으면 형사처벌 대상입니다.",
        script: "계약서상 급여를 시급으로 환산하면 최저임금에 미달합니다. 2025년 최저시급 10,030원 기준으로 수정을 요청드립니다.",
    },
    MandatoryRule {
        rule_id: "mandatory_labor_03",
        category: "근로기준법 위반",
        risk_pattern: "4시간 근무 시 30분, 8시간 근무 시 1시간의 휴게시간을 보장하지 않음",
        legal_reference: "근로기준법 제54조 (휴게)",
        explanation: "휴게시간은 근로시간 도중에 반드시 주어야 하며 '알아서 쉬라'는 식은 위법입니다.",
        script: "근로기준법 제54조에 따라 4시간 근무 시 30분, 8시간 근무 시 1시간 이상의 휴게시간을 명시해 주세요.",
    },
    MandatoryRule {
        rule_id: "mandatory_retirement_01",
        category: "근로자퇴직급여보장법 위반",
        risk_pattern: "퇴직금 없음, 퇴직금은 월급에 포함 등의 문구",
        legal_reference: "근로자퇴직급여보장법 제8조 (퇴직금제도의 설정)",
        explanation: "1년 이상, 주 15시간 이상 일하면 퇴직금을 받아야 하며 월급에 포함시키는 약정은 위법입니다.",
        script: "근로자퇴직급여보장법 제8조에 따라 계속근로 1년당 30일분 이상의 평균임금을 퇴직금으로 지급하는 조항 추가를 요청드립니다.",
    },
    MandatoryRule {
        rule_id: "mandatory_subcontract_01",
        category: "하도급법 위반",
        risk_pattern: "횟수 제한 없는 무상 수정, 갑이 만족할 때까지 수정 등의 문구",
        legal_reference: "하도급거래 공정화에 관한 법률 제3조의4 (부당한 특약 금지)",
        explanation: "대금은 고정인데 수정은 끝없이 요구하는 특약은 부당합니다. 무상 수정 횟수를 정해야 합니다.",
        script: "무제한 수정 요구는 부당한 특약에 해당할 수 있습니다. '무상 수정 2회, 이후 유상'으로 수정을 요청드립니다.",
    },
];

/// Numbered rule blocks injected into the analysis prompt: the pattern to look
/// for, then the explanation and script the model should reuse when it matches.
pub fn reference_lines() -> String {
    MANDATORY_RISK_CLAUSES
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            format!(
                "{}. [{}] {} / {} - {}\n   설명: {}\n   협상 문구: {}",
                i + 1,
                rule.rule_id,
                rule.category,
                rule.legal_reference,
                rule.risk_pattern,
                rule.explanation,
                rule.script
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ids_are_unique() {
        let mut ids: Vec<_> = MANDATORY_RISK_CLAUSES.iter().map(|r| r.rule_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), MANDATORY_RISK_CLAUSES.len());
    }

    #[test]
    fn test_reference_lines_are_numbered() {
        let lines = reference_lines();
        let numbered: Vec<_> = lines
            .lines()
            .filter(|l| l.starts_with(|c: char| c.is_ascii_digit()))
            .collect();
        assert_eq!(numbered.len(), 6);
        assert!(numbered[0].starts_with("1. [mandatory_labor_01] 근로기준법 위반 / 근로기준법 제20조"));
        assert!(numbered[5].starts_with("6. [mandatory_subcontract_01] 하도급법 위반 / 하도급거래"));
    }

    #[test]
    fn test_every_rule_carries_explanation_and_script() {
        let lines = reference_lines();
        for rule in &MANDATORY_RISK_CLAUSES {
            assert!(lines.contains(rule.explanation));
            assert!(lines.contains(rule.script));
        }
        assert_eq!(lines.matches("   설명: ").count(), 6);
        assert_eq!(lines.matches("   협상 문구: ").count(), 6);
    }
}
