use foreman::{Error, Fcfs, ScheduledTask, Scheduler};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

#[test]
fn test_fcfs_dequeues_in_submission_order() {
    let scheduler = Fcfs::new(4, 16);

    let channels: Vec<_> = (0..5)
        .map(|i| scheduler.spawn(move || i).unwrap())
        .collect();

    for _ in 0..5 {
        let ScheduledTask { task, .. } = scheduler.next().expect("task queued");
        task.run().unwrap();
    }

    let values: Vec<_> = channels.into_iter().map(|c| c.recv().unwrap()).collect();
    assert_eq!(values, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_fcfs_round_robin_assignment() {
    let scheduler = Fcfs::new(3, 16);

    for _ in 0..7 {
        scheduler.spawn(|| ()).unwrap();
    }

    let workers: Vec<_> = (0..7)
        .map(|_| scheduler.next().expect("task queued").worker)
        .collect();

    assert_eq!(workers, vec![0, 1, 2, 0, 1, 2, 0]);
}

#[test]
fn test_fcfs_single_worker_always_zero() {
    let scheduler = Fcfs::new(1, 8);

    for _ in 0..3 {
        scheduler.spawn(|| ()).unwrap();
    }

    for _ in 0..3 {
        assert_eq!(scheduler.next().unwrap().worker, 0);
    }
}

#[test]
fn test_fcfs_has_tasks() {
    let scheduler = Fcfs::new(2, 8);
    assert!(!scheduler.has_tasks());

    scheduler.spawn(|| ()).unwrap();
    assert!(scheduler.has_tasks());
    assert_eq!(scheduler.pending(), 1);

    let _ = scheduler.next();
    assert!(!scheduler.has_tasks());
}

#[test]
fn test_fcfs_try_spawn_reports_full_queue() {
    let scheduler = Fcfs::new(2, 2);

    scheduler.try_spawn(|| 1).unwrap();
    scheduler.try_spawn(|| 2).unwrap();

    let err = scheduler.try_spawn(|| 3).unwrap_err();
    assert!(
        matches!(err, Error::QueueFull { capacity: 2 }),
        "Expected QueueFull, got {err:?}"
    );
    assert_eq!(scheduler.pending(), 2);
}

#[test]
fn test_fcfs_close_rejects_and_drains() {
    let scheduler = Fcfs::new(2, 8);

    let channel = scheduler.spawn(|| 42).unwrap();
    scheduler.close();

    assert!(scheduler.is_closed());
    assert!(matches!(scheduler.spawn(|| 0), Err(Error::ShuttingDown)));
    assert!(matches!(scheduler.try_spawn(|| 0), Err(Error::ShuttingDown)));

    let scheduled = scheduler.next().expect("accepted task is still handed out");
    scheduled.task.run().unwrap();
    assert_eq!(channel.recv(), Ok(42));

    assert!(scheduler.next().is_none(), "Closed and empty yields None");
}

#[test]
fn test_fcfs_next_blocks_until_submission() {
    let scheduler = Arc::new(Fcfs::new(2, 8));
    let received = Arc::new(AtomicBool::new(false));

    let consumer = {
        let scheduler = scheduler.clone();
        let received = received.clone();
        thread::spawn(move || {
            let scheduled = scheduler.next();
            received.store(true, Ordering::SeqCst);
            scheduled
        })
    };

    thread::sleep(Duration::from_millis(50));
    assert!(!received.load(Ordering::SeqCst), "next should block while empty");

    let channel = scheduler.spawn(|| "ready").unwrap();
    let scheduled = consumer.join().unwrap().expect("task delivered");
    scheduled.task.run().unwrap();

    assert_eq!(channel.recv(), Ok("ready"));
}

#[test]
fn test_fcfs_close_wakes_blocked_next() {
    let scheduler = Arc::new(Fcfs::new(2, 8));

    let consumer = {
        let scheduler = scheduler.clone();
        thread::spawn(move || scheduler.next().is_none())
    };

    thread::sleep(Duration::from_millis(20));
    scheduler.close();

    assert!(consumer.join().unwrap(), "close should release next with None");
}

#[test]
fn test_fcfs_backpressure_delays_producer_without_loss() {
    let scheduler = Arc::new(Fcfs::new(2, 4));
    let executed = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicBool::new(false));

    let producer = {
        let scheduler = scheduler.clone();
        let executed = executed.clone();
        let finished = finished.clone();
        thread::spawn(move || {
            let channels: Vec<_> = (0..20)
                .map(|_| {
                    let executed = executed.clone();
                    scheduler
                        .spawn(move || {
                            executed.fetch_add(1, Ordering::SeqCst);
                        })
                        .unwrap()
                })
                .collect();
            finished.store(true, Ordering::SeqCst);
            channels
        })
    };

    thread::sleep(Duration::from_millis(50));
    assert!(!finished.load(Ordering::SeqCst), "Producer should be held back");
    assert_eq!(scheduler.pending(), 4);

    for _ in 0..20 {
        scheduler.next().unwrap().task.run().unwrap();
    }

    let channels = producer.join().unwrap();
    for channel in channels {
        assert_eq!(channel.recv(), Ok(()));
    }

    assert_eq!(executed.load(Ordering::SeqCst), 20);
    assert!(!scheduler.has_tasks());
}

#[test]
fn test_fcfs_concurrent_producers() {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 100;

    let scheduler = Arc::new(Fcfs::new(3, 8));

    let consumer = {
        let scheduler = scheduler.clone();
        thread::spawn(move || {
            let mut workers = Vec::new();
            while let Some(scheduled) = scheduler.next() {
                workers.push(scheduled.worker);
                scheduled.task.run().unwrap();
            }
            workers
        })
    };

    let log = Arc::new(Mutex::new(Vec::new()));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let scheduler = scheduler.clone();
            let log = log.clone();
            thread::spawn(move || {
                (0..PER_PRODUCER)
                    .map(|i| {
                        let log = log.clone();
                        scheduler
                            .spawn(move || log.lock().unwrap().push((p, i)))
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let channels: Vec<_> = producers
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    for channel in channels {
        assert_eq!(channel.recv(), Ok(()));
    }

    let mut seen = vec![0usize; PRODUCERS];
    for &(p, i) in log.lock().unwrap().iter() {
        assert_eq!(i, seen[p], "Producer {p} tasks should run in submission order");
        seen[p] += 1;
    }
    assert!(seen.iter().all(|&n| n == PER_PRODUCER));

    scheduler.close();
    let workers = consumer.join().unwrap();

    assert_eq!(workers.len(), PRODUCERS * PER_PRODUCER);
    for (n, worker) in workers.iter().enumerate() {
        assert_eq!(*worker, n % 3, "Assignment follows dequeue order");
    }
}
