//! Каналы уведомлений об изменении серверных данных.
//!
//! Мутация (удаление или замена района) вызывает
//! [`DataStream::notify_data_changed`]; каждый читатель, подписанный через
//! [`DataStreamExt::subscribe`], перезапрашивает данные. Канал хранит только
//! последний сигнал, медленный читатель пропускает промежуточные.

mod replay;
mod signal;
mod subscribe;

pub use replay::{DataStream, ReplayDataStream};
pub use signal::{Signal, SignalReceiver};
pub use subscribe::{once_per_signal, transform_latest, DataStreamExt};
