use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::SignalReceiver;

/// Канал уведомлений об изменении данных.
///
/// Пишущая сторона (удаление, замена, подтверждение района) вызывает
/// [`DataStream::notify_data_changed`] после успешной мутации на сервере;
/// читающая сторона подписывается через
/// [`DataStreamExt::subscribe`](super::DataStreamExt::subscribe) и
/// перезапрашивает данные на каждый сигнал.
///
/// Трейт object-safe: репозитории хранят `Arc<dyn DataStream>`.
pub trait DataStream: Send + Sync {
    /// Записывает новый сигнал и делает его видимым всем текущим и будущим
    /// подпискам. Никогда не завершается ошибкой.
    fn notify_data_changed(&self);

    /// Новый приёмник, для которого текущий буферизованный сигнал ещё не
    /// прочитан.
    fn signals(&self) -> SignalReceiver;
}

/// Канал с буфером на один сигнал (replay-1).
///
/// При создании сразу выпускает начальный сигнал, поэтому каждая подписка
/// хотя бы раз выполняет свою проекцию без внешнего триггера. Хранит
/// единственное значение: номер последнего сигнала; новые сигналы
/// вытесняют старый, очереди нет.
pub struct ReplayDataStream {
    name: Arc<str>,
    tx: watch::Sender<u64>,
}

impl ReplayDataStream {
    /// Создаёт канал и выпускает начальный сигнал.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        let (tx, _) = watch::channel(1);
        debug!(stream = %name, "Data stream created");
        Self { name, tx }
    }

    /// Имя канала (для логов).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Номер последнего выпущенного сигнала.
    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Количество живых подписок.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl DataStream for ReplayDataStream {
    fn notify_data_changed(&self) {
        // send_modify не требует живых приёмников: сигнал остаётся в буфере
        // для будущих подписок.
        self.tx.send_modify(|generation| *generation += 1);
        debug!(
            stream = %self.name,
            generation = self.generation(),
            subscribers = self.subscriber_count(),
            "Data change notified"
        );
    }

    fn signals(&self) -> SignalReceiver {
        SignalReceiver::new(self.tx.subscribe())
    }
}

impl std::fmt::Debug for ReplayDataStream {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ReplayDataStream")
            .field("name", &self.name)
            .field("generation", &self.generation())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест проверяет, что канал выпускает начальный сигнал при создании.
    #[test]
    fn test_initial_generation() {
        let stream = ReplayDataStream::new("areas");
        assert_eq!(stream.generation(), 1);
        assert_eq!(stream.name(), "areas");
    }

    /// Тест проверяет, что notify без подписчиков не теряет сигнал.
    #[tokio::test]
    async fn test_notify_without_subscribers_is_buffered() {
        let stream = ReplayDataStream::new("areas");
        stream.notify_data_changed();
        stream.notify_data_changed();
        assert_eq!(stream.generation(), 3);

        let mut signals = stream.signals();
        assert_eq!(signals.recv().await.map(|s| s.generation()), Some(3));
    }

    /// Тест проверяет учёт подписчиков.
    #[test]
    fn test_subscriber_count() {
        let stream = ReplayDataStream::new("areas");
        let a = stream.signals();
        let b = stream.signals();
        assert_eq!(stream.subscriber_count(), 2);
        drop(a);
        assert_eq!(stream.subscriber_count(), 1);
        drop(b);
        assert_eq!(stream.subscriber_count(), 0);
    }

    /// Тест проверяет, что канал доступен через trait-объект.
    #[tokio::test]
    async fn test_dyn_data_stream() {
        let stream: Arc<dyn DataStream> = Arc::new(ReplayDataStream::new("areas"));
        stream.notify_data_changed();
        let mut signals = stream.signals();
        assert_eq!(signals.recv().await.map(|s| s.generation()), Some(2));
    }
}
