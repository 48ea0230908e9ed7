/// 单槽帧中继模块
/// Single-slot frame relay
///
/// 解码线程和检测线程速度不匹配: 解码可能比检测快好几倍。
/// 中继只保留一个待取帧,生产者发布新帧时直接覆盖旧帧,
/// 消费者永远拿到最新画面 (有界陈旧性,宁可丢帧不要延迟)。
use crossbeam_channel::{bounded, Receiver, Sender};
use std::error::Error;
use std::fmt;

/// 中继已关闭 (生产者退出)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelayClosed;

impl fmt::Display for RelayClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame relay closed")
    }
}

impl Error for RelayClosed {}

/// 生产者句柄: 发布覆盖式单帧
pub struct RelayPublisher<T> {
    tx: Sender<T>,
    drain: Receiver<T>,
}

/// 消费者句柄: 阻塞领取最新帧
pub struct RelayConsumer<T> {
    rx: Receiver<T>,
}

/// 创建单槽帧中继 (单生产者 + 单消费者)
pub fn frame_relay<T>() -> (RelayPublisher<T>, RelayConsumer<T>) {
    // 容量1的channel,生产者侧先排空再发送 = 覆盖最新
    let (tx, rx) = bounded(1);
    let drain = rx.clone();
    (RelayPublisher { tx, drain }, RelayConsumer { rx })
}

impl<T> RelayPublisher<T> {
    /// 发布一帧: 永不阻塞,未被领取的旧帧直接丢弃
    pub fn publish(&self, frame: T) {
        // 只有生产者会发送,排空后槽位必然为空
        let _ = self.drain.try_recv();
        let _ = self.tx.try_send(frame);
    }

    /// 关闭中继,唤醒阻塞中的消费者
    ///
    /// Drop同样会关闭,这里只是把意图写明白
    pub fn close(self) {}
}

impl<T> RelayConsumer<T> {
    /// 领取一帧: 阻塞直到有帧可取,或中继已关闭
    ///
    /// 返回的帧不会早于调用发起前发布的任何一帧;
    /// 同一帧不会被领取两次
    pub fn take(&self) -> Result<T, RelayClosed> {
        self.rx.recv().map_err(|_| RelayClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn take_returns_latest_published() {
        let (publisher, consumer) = frame_relay();
        for i in 1..=100 {
            publisher.publish(i);
        }
        assert_eq!(consumer.take(), Ok(100));
    }

    #[test]
    fn publish_never_blocks_without_consumer() {
        let (publisher, _consumer) = frame_relay();
        // 远超容量也不能阻塞
        for i in 0..10_000 {
            publisher.publish(i);
        }
    }

    #[test]
    fn no_double_delivery() {
        let (publisher, consumer) = frame_relay();
        publisher.publish(1);
        assert_eq!(consumer.take(), Ok(1));

        // 没有新帧时第二次take必须阻塞,而不是重复返回
        let handle = thread::spawn(move || consumer.take());
        thread::sleep(Duration::from_millis(50));
        publisher.publish(2);
        assert_eq!(handle.join().unwrap(), Ok(2));
    }

    #[test]
    fn close_unblocks_pending_take() {
        let (publisher, consumer) = frame_relay::<u64>();
        let handle = thread::spawn(move || consumer.take());
        thread::sleep(Duration::from_millis(50));
        publisher.close();
        assert_eq!(handle.join().unwrap(), Err(RelayClosed));
    }

    #[test]
    fn pending_frame_still_delivered_after_close() {
        let (publisher, consumer) = frame_relay();
        publisher.publish(7);
        publisher.close();
        assert_eq!(consumer.take(), Ok(7));
        assert_eq!(consumer.take(), Err(RelayClosed));
    }

    #[test]
    fn consumer_always_sees_recent_frames() {
        let (publisher, consumer) = frame_relay();

        let producer = thread::spawn(move || {
            for i in 0u64..1000 {
                publisher.publish(i);
            }
            // publisher在此Drop,中继关闭
        });

        let mut last = None;
        while let Ok(frame) = consumer.take() {
            // 帧序号只能前进,不能回退或重复
            if let Some(prev) = last {
                assert!(frame > prev, "frame {} after {}", frame, prev);
            }
            last = Some(frame);
        }
        producer.join().unwrap();
    }
}
