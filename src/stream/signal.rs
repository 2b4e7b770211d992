use tokio::sync::watch;

/// Событие «данные на сервере изменились».
///
/// Полезной нагрузки нет. `generation` это порядковый номер сигнала в канале
/// (начальный сигнал, выпускаемый при создании канала, имеет номер 1);
/// нужен только для диагностики и проверки порядка.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signal {
    generation: u64,
}

impl Signal {
    pub(crate) fn new(generation: u64) -> Self {
        Self { generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Приёмник сигналов одной подписки.
///
/// Сразу после создания буферизованный сигнал считается непрочитанным,
/// поэтому первый вызов [`SignalReceiver::recv`] возвращается немедленно.
/// Несколько сигналов, пришедших между вызовами `recv`, схлопываются в
/// последний.
#[derive(Debug)]
pub struct SignalReceiver {
    inner: watch::Receiver<u64>,
    pending: bool,
}

impl SignalReceiver {
    pub(crate) fn new(inner: watch::Receiver<u64>) -> Self {
        // 0 означает, что канал ещё ни разу не выпускал сигнал.
        let pending = *inner.borrow() > 0;
        Self { inner, pending }
    }

    /// Ждёт следующий сигнал.
    ///
    /// Возвращает `None`, когда владелец канала уничтожен и новых сигналов
    /// не будет. Cancel-safe: можно использовать внутри `tokio::select!`.
    pub async fn recv(&mut self) -> Option<Signal> {
        if std::mem::take(&mut self.pending) {
            return Some(Signal::new(*self.inner.borrow_and_update()));
        }
        self.inner.changed().await.ok()?;
        Some(Signal::new(*self.inner.borrow_and_update()))
    }

    /// Есть ли непрочитанный сигнал.
    pub fn has_pending(&self) -> bool {
        self.pending || self.inner.has_changed().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест проверяет, что буферизованное значение отдаётся новому приёмнику
    /// сразу.
    #[tokio::test]
    async fn test_buffered_signal_is_replayed() {
        let (_tx, rx) = watch::channel(3u64);
        let mut signals = SignalReceiver::new(rx);

        assert!(signals.has_pending());
        assert_eq!(signals.recv().await, Some(Signal::new(3)));
        assert!(!signals.has_pending());
    }

    /// Тест проверяет, что быстрые сигналы схлопываются в последний.
    #[tokio::test]
    async fn test_rapid_signals_coalesce() {
        let (tx, rx) = watch::channel(1u64);
        let mut signals = SignalReceiver::new(rx);
        assert_eq!(signals.recv().await.map(|s| s.generation()), Some(1));

        for _ in 0..5 {
            tx.send_modify(|g| *g += 1);
        }

        assert_eq!(signals.recv().await.map(|s| s.generation()), Some(6));
        assert!(!signals.has_pending());
    }

    /// Тест проверяет, что канал без начального сигнала ничего не отдаёт.
    #[tokio::test]
    async fn test_no_replay_before_first_signal() {
        let (tx, rx) = watch::channel(0u64);
        let mut signals = SignalReceiver::new(rx);
        assert!(!signals.has_pending());

        tx.send_modify(|g| *g += 1);
        assert_eq!(signals.recv().await.map(|s| s.generation()), Some(1));
    }

    /// Тест проверяет, что после уничтожения отправителя `recv` возвращает
    /// `None`.
    #[tokio::test]
    async fn test_closed_channel_ends() {
        let (tx, rx) = watch::channel(1u64);
        let mut signals = SignalReceiver::new(rx);
        assert!(signals.recv().await.is_some());

        drop(tx);
        assert_eq!(signals.recv().await, None);
    }
}
