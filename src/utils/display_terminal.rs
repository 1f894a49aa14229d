//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 시작 과정(환경 로드, DB 연결, 인덱스 생성, 서버 바인딩)을
//! 단계별로 보기 좋게 출력합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║             Account Service Backend              ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(50);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// 시작 단계 완료 표시
///
/// ```text
/// ✓ Step 2: MongoDB 연결
/// ```
pub fn print_step(step: u8, description: &str) {
    println!("✓ Step {}: {}", step, description);
}

/// 단계 아래의 세부 항목
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 서버 주소와 주요 엔드포인트 요약
pub fn print_endpoint_summary(bind_address: &str, endpoints: &[&str]) {
    println!();
    print_boxed_title("🚀 ACCOUNT SERVICE READY");
    println!("   🌐 http://{}", bind_address);
    for endpoint in endpoints {
        println!("   📍 {}", endpoint);
    }
    println!();
}
