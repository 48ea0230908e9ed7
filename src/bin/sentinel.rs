/// AprilTag哨兵 (AprilTag Sentinel)
///
/// RTSP实时标签监控: 报告每个AprilTag ID的出现与消失
///
/// 系统架构:
/// 1. 解码线程: FFmpeg RTSP解码 → 帧中继 (只保留最新帧)
/// 2. 检测线程: AprilTag检测 + 去抖跟踪 (独立工作线程)
/// 3. 主线程:   事件报告输出
use apriltag_sentinel::rtsp::{self, AprilTagDetector, Decoder, PresenceTracker, TagEvent};
use clap::Parser;
use crossbeam_channel::unbounded;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// AprilTag哨兵参数
#[derive(Parser, Debug)]
#[command(author, version, about = "AprilTag哨兵 - RTSP标签实时监控", long_about = None)]
struct Args {
    /// RTSP流地址
    rtsp_url: String,

    /// AprilTag家族 (tag36h11 / tagStandard41h12 / ...)
    #[arg(default_value = "tagStandard41h12")]
    tag_family: String,

    /// 连续丢失多少帧后判定标签消失
    #[arg(long, default_value_t = rtsp::DEFAULT_MISSING_THRESHOLD,
          value_parser = clap::value_parser!(u32).range(1..))]
    missing_threshold: u32,

    /// 以JSON行输出标签事件
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🚀 AprilTag哨兵启动");
    println!("📹 RTSP地址: {}", args.rtsp_url);
    println!("🏷️  标签家族: {}", args.tag_family);
    println!("⏱️  消失阈值: 连续丢失{}帧", args.missing_threshold);
    println!();

    // 检测器初始化放在开流之前,家族名写错时立刻报错退出
    let detector = AprilTagDetector::new(&args.tag_family)?;
    let tracker = PresenceTracker::new(args.missing_threshold);

    let (publisher, consumer) = rtsp::frame_relay();
    let (tx_events, rx_events) = unbounded();

    ctrlc::set_handler(|| {
        println!("\n⏹️  收到退出信号,正在停止...");
        rtsp::stop();
    })?;

    // ========== 启动解码线程 ==========
    let rtsp_url = args.rtsp_url.clone();
    let decode = std::thread::spawn(move || {
        if let Err(e) = Decoder::new(rtsp_url).run(publisher) {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    });

    // ========== 启动检测线程 ==========
    let detect = std::thread::spawn(move || {
        rtsp::detection_thread(consumer, detector, tracker, tx_events);
    });

    // ========== 主线程: 事件报告 ==========
    println!("Reporting visible AprilTags. Press Ctrl+C to exit.");
    for event in rx_events {
        if args.json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            match event {
                TagEvent::Found(id) => println!("Found AprilTag ID: {}", id),
                TagEvent::Lost(id) => println!("AprilTag ID {} is no longer visible", id),
            }
        }
    }

    let _ = detect.join();
    let _ = decode.join();
    println!("✅ 已退出");
    Ok(())
}
