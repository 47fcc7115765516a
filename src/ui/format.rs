use std::time::Duration;

/// Formatea segundos como `HH:MM:SS` con ceros a la izquierda.
///
/// Las horas no se truncan: más de 99 horas simplemente ocupa más dígitos.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Línea de progreso `transcurrido / total` para el embed de reproducción
pub fn format_progress(elapsed: Option<Duration>, total_secs: u64) -> String {
    match elapsed {
        Some(elapsed) => format!(
            "{} / {}",
            format_duration(elapsed.as_secs()),
            format_duration(total_secs)
        ),
        None => format!("⏸️ / {}", format_duration(total_secs)),
    }
}

/// Barra de volumen en texto, 0-100 repartido en 20 segmentos
pub fn volume_bar(volume: u8) -> String {
    let segments = 20;
    let filled = usize::from(volume.min(100)) * segments / 100;
    let empty = segments - filled;

    format!("`[{}{}]`", "█".repeat(filled), "▒".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(59), "00:00:59");
        assert_eq!(format_duration(60), "00:01:00");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(86399), "23:59:59");
        assert_eq!(format_duration(360000), "100:00:00");
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(
            format_progress(Some(Duration::from_millis(61_900)), 215),
            "00:01:01 / 00:03:35"
        );
        assert_eq!(format_progress(None, 215), "⏸️ / 00:03:35");
    }

    #[test]
    fn test_volume_bar() {
        assert_eq!(volume_bar(0), format!("`[{}]`", "▒".repeat(20)));
        assert_eq!(volume_bar(100), format!("`[{}]`", "█".repeat(20)));
        assert_eq!(volume_bar(50), format!("`[{}{}]`", "█".repeat(10), "▒".repeat(10)));
    }
}
