// Exercise the full command path against a local HTTP listener standing in
// for the robot's firmware web server.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use mebo::{Config, Direction, Error, Mebo};

const VERSION_BODY: &str = "version: 03.02.37";

/// Requests seen by the fake robot, as `path?query` targets in arrival order.
type SeenTargets = Arc<Mutex<Vec<String>>>;

/// Starts a minimal HTTP/1.1 server that answers the i-th request with the
/// i-th entry of `responses` (the last entry repeats once exhausted).
async fn fake_robot(responses: Vec<(u16, &'static str)>) -> (SocketAddr, SeenTargets) {
    let _ = env_logger::builder().is_test(true).try_init();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: SeenTargets = Arc::new(Mutex::new(Vec::new()));
    let counter = Arc::new(AtomicUsize::new(0));

    let seen_by_server = seen.clone();
    tokio::spawn(async move {
        let responses = Arc::new(responses);
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            tokio::spawn(serve_connection(
                stream,
                responses.clone(),
                counter.clone(),
                seen_by_server.clone(),
            ));
        }
    });

    (addr, seen)
}

async fn serve_connection(
    mut stream: TcpStream,
    responses: Arc<Vec<(u16, &'static str)>>,
    counter: Arc<AtomicUsize>,
    seen: SeenTargets,
) {
    let mut buffer: Vec<u8> = Vec::new();
    loop {
        // Read one request head. Commands are GETs, there is no body to drain.
        let head_end = loop {
            if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            let mut chunk = [0u8; 1024];
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buffer.extend_from_slice(&chunk[..n]),
            }
        };
        let head = String::from_utf8_lossy(&buffer[..head_end]).into_owned();
        buffer.drain(..head_end);

        let target = head
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .unwrap_or_default()
            .to_owned();
        seen.lock().await.push(target);

        let index = counter.fetch_add(1, Ordering::SeqCst);
        let (status, body) = responses[index.min(responses.len() - 1)];
        let reason = if status < 400 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: keep-alive\r\n\r\n{body}",
            body.len()
        );
        if stream.write_all(response.as_bytes()).await.is_err() {
            return;
        }
    }
}

#[tokio::test]
async fn connect_probes_the_firmware_version() {
    let (addr, seen) = fake_robot(vec![(200, VERSION_BODY)]).await;

    let robot = Mebo::connect(addr).await.unwrap();
    assert_eq!(robot.version(), "03.02.37");
    assert_eq!(robot.address().host, addr.ip());
    assert_eq!(robot.address().port, addr.port());

    let seen = seen.lock().await;
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("req=get_version"), "probe was {}", seen[0]);
}

#[tokio::test]
async fn drive_issues_exactly_one_request_with_its_parameters() {
    let (addr, seen) = fake_robot(vec![(200, VERSION_BODY), (200, "move_forward:ok")]).await;

    let robot = Mebo::connect(addr).await.unwrap();
    robot
        .wheels
        .drive(Direction::North, 255, Duration::from_millis(1000))
        .await
        .unwrap();

    let seen = seen.lock().await;
    assert_eq!(seen.len(), 2, "probe plus one motion request, got {seen:?}");
    let target = &seen[1];
    assert!(target.contains("req=move_forward"), "target was {target}");
    assert!(target.contains("dur=1000"), "target was {target}");
    assert!(target.contains("value=255"), "target was {target}");
}

#[tokio::test]
async fn short_drive_is_clamped_on_the_wire() {
    let (addr, seen) = fake_robot(vec![(200, VERSION_BODY), (200, "move_left:ok")]).await;

    let robot = Mebo::connect(addr).await.unwrap();
    robot
        .wheels
        .drive(Direction::West, 80, Duration::from_millis(500))
        .await
        .unwrap();

    let seen = seen.lock().await;
    assert!(seen[1].contains("req=move_left"), "target was {}", seen[1]);
    assert!(seen[1].contains("dur=1000"), "target was {}", seen[1]);
}

#[tokio::test]
async fn claw_open_succeeds_and_device_failure_surfaces() {
    let (addr, seen) = fake_robot(vec![
        (200, VERSION_BODY),
        (200, "c_open:ok"),
        (500, "internal error"),
    ])
    .await;

    let robot = Mebo::connect(addr).await.unwrap();
    robot.claw.open(Duration::from_millis(1000)).await.unwrap();

    match robot.claw.close(Duration::from_millis(1000)).await {
        Err(Error::Device { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected Device error, got {other:?}"),
    }

    let seen = seen.lock().await;
    assert!(seen[1].contains("req=c_open"), "target was {}", seen[1]);
    assert!(seen[2].contains("req=c_close"), "target was {}", seen[2]);
}

#[tokio::test]
async fn invalid_speed_fails_before_any_request() {
    let (addr, seen) = fake_robot(vec![(200, VERSION_BODY)]).await;

    let robot = Mebo::connect(addr).await.unwrap();
    match robot
        .wheels
        .drive(Direction::North, 300, Duration::from_secs(1))
        .await
    {
        Err(Error::InvalidParameter { name: "speed", .. }) => {}
        other => panic!("expected InvalidParameter, got {other:?}"),
    }

    // Only the connection probe reached the wire.
    assert_eq!(seen.lock().await.len(), 1);
}

#[tokio::test]
async fn boundary_position_parses_the_limit_map() {
    let (addr, _) = fake_robot(vec![
        (200, VERSION_BODY),
        (200, "get_boundary_position: s_up=100&s_down=0&c_open=75&c_close=10"),
    ])
    .await;

    let robot = Mebo::connect(addr).await.unwrap();
    let positions = robot.boundary_position().await.unwrap();

    assert_eq!(positions.len(), 4);
    assert_eq!(positions["s_up"], 100);
    assert_eq!(positions["s_down"], 0);
    assert_eq!(positions["c_open"], 75);
    assert_eq!(positions["c_close"], 10);
}

#[tokio::test]
async fn malformed_probe_answer_is_a_protocol_error() {
    let (addr, _) = fake_robot(vec![(200, "not the expected shape")]).await;

    match Mebo::connect(addr).await {
        Err(Error::Protocol(_)) => {}
        other => panic!("expected Protocol error, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn auto_discovery_without_a_robot_creates_no_session() {
    let timeout = Duration::from_millis(300);
    let started = Instant::now();
    let result = Mebo::connect_with_config(Config {
        address: None,
        discovery_timeout: timeout,
        ..Config::default()
    })
    .await;

    match result {
        Err(Error::DiscoveryTimeout { timeout: t }) => assert_eq!(t, timeout),
        // Hosts without multicast networking fail during mDNS daemon setup.
        Err(Error::Discovery(_)) => {}
        Ok(_) => panic!("connected to a robot that should not exist"),
        Err(other) => panic!("expected a discovery failure, got {other:?}"),
    }
    assert!(started.elapsed() < timeout + Duration::from_secs(2));
}
