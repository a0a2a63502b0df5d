use crate::ai::ContentGateway;
use crate::logger;
use crate::models::{AiRequest, AiResponse};
use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::sync::Arc;
use std::thread;

/// Run one request against the gateway and wrap the outcome with its ticket.
pub async fn dispatch<G>(gateway: &G, request: AiRequest) -> AiResponse
where
    G: ContentGateway + ?Sized,
{
    match request {
        AiRequest::Generate {
            ticket,
            level,
            prior_questions,
        } => AiResponse::Generated {
            ticket,
            result: gateway.generate_quiz(level, &prior_questions).await,
        },
        AiRequest::Grade {
            ticket,
            level,
            quiz,
            answers,
        } => AiResponse::Graded {
            ticket,
            result: gateway.grade_and_explain(&quiz, &answers, level).await,
        },
    }
}

/// Background thread that owns the runtime and serves requests one at a time.
/// Exits when the request channel is disconnected.
pub fn spawn_ai_worker(
    gateway: Arc<dyn ContentGateway>,
    ai_tx: Sender<AiResponse>,
    ai_rx: Receiver<AiRequest>,
) -> io::Result<thread::JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("exam-drill::ai_worker".to_string())
        .spawn(move || {
            while let Ok(request) = ai_rx.recv() {
                let ticket = request.ticket();
                logger::log(&format!("Worker received request (ticket {})", ticket));

                let response = runtime.block_on(dispatch(gateway.as_ref(), request));

                logger::log(&format!("Worker sending response (ticket {})", ticket));
                if ai_tx.send(response).is_err() {
                    break;
                }
            }
            logger::log("Worker channel disconnected, exiting");
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::{sample_quiz, ScriptedGateway};
    use crate::models::Level;
    use std::time::Duration;

    #[test]
    fn test_worker_round_trip() {
        let gateway = ScriptedGateway::new();
        gateway.push_quiz(Ok(sample_quiz(Level::Eiken, "worker")));

        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (resp_tx, resp_rx) = crossbeam_channel::unbounded();
        let handle = spawn_ai_worker(Arc::new(gateway), resp_tx, req_rx).unwrap();

        req_tx
            .send(AiRequest::Generate {
                ticket: 7,
                level: Level::Eiken,
                prior_questions: vec![],
            })
            .unwrap();

        let response = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(response.ticket(), 7);
        match response {
            AiResponse::Generated { result: Ok(quiz), .. } => {
                assert_eq!(quiz.questions[0].question, "worker question 1");
            }
            other => panic!("unexpected response {:?}", other),
        }

        drop(req_tx);
        handle.join().unwrap();
    }
}
