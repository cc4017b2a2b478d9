use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Простой middleware для логирования запросов:
/// время | длительность | размер ответа | статус | метод | путь
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    use chrono::Utc;

    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(_) => {
            let duration = start.elapsed();
            tracing::warn!(
                "{} | {:>5}ms | {:>12} | {} {:>6} {}",
                Utc::now().format("%H:%M:%S"),
                duration.as_millis(),
                "error",
                parts.status.as_u16(),
                method,
                uri.path()
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let size = bytes.len();
    let duration = start.elapsed();

    tracing::info!(
        "{} | {:>5}ms | {:>12} | {} {:>6} {}",
        Utc::now().format("%H:%M:%S"),
        duration.as_millis(),
        format_number(size),
        parts.status.as_u16(),
        method,
        uri.path()
    );

    // Создаем новый ответ с прочитанным телом
    Response::from_parts(parts, Body::from(bytes))
}

/// Форматирует число с разделителями тысяч (точками)
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }
}
