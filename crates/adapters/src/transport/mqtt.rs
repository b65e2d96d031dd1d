// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MQTT v5 transport built on rumqttc

use super::{Transport, TransportError, TransportEvent};
use async_trait::async_trait;
use mqlog_core::{InboundMessage, Qos};
use rumqttc::v5::mqttbytes::v5::Packet;
use rumqttc::v5::mqttbytes::QoS;
use rumqttc::v5::{AsyncClient, Event, EventLoop, MqttOptions};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Capacity of the client's outgoing request queue
const REQUEST_CAPACITY: usize = 10;

/// Pause between polls after a connection error
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Broker connection settings
#[derive(Debug, Clone)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub keep_alive: Duration,
}

impl MqttConfig {
    /// Settings for a logger scoped to `team`
    pub fn for_team(host: &str, port: u16, team: &str) -> Self {
        Self {
            host: host.to_string(),
            port,
            client_id: format!("logger-{}", team),
            keep_alive: Duration::from_secs(60),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// MQTT v5 transport
#[derive(Clone)]
pub struct MqttTransport {
    client: AsyncClient,
}

impl MqttTransport {
    /// Connect to the broker and start pumping events onto `events`.
    ///
    /// Returns once the broker has acknowledged the session. A failure
    /// before that point is reported as [`TransportError::Connect`]; after
    /// it, poll errors are logged and the client reconnects on its own.
    pub async fn connect(
        config: MqttConfig,
        events: mpsc::Sender<TransportEvent>,
        shutdown: CancellationToken,
    ) -> Result<(Self, JoinHandle<()>), TransportError> {
        let mut opts = MqttOptions::new(&config.client_id, &config.host, config.port);
        opts.set_keep_alive(config.keep_alive);

        let (client, mut event_loop) = AsyncClient::new(opts, REQUEST_CAPACITY);

        info!(addr = %config.addr(), client_id = %config.client_id, "connecting");
        let code = loop {
            match event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => break format!("{:?}", ack.code),
                Ok(_) => continue,
                Err(e) => {
                    return Err(TransportError::Connect {
                        addr: config.addr(),
                        reason: e.to_string(),
                    })
                }
            }
        };

        events
            .send(TransportEvent::Connected { code })
            .await
            .map_err(|_| TransportError::ChannelClosed)?;

        let pump = tokio::spawn(pump_events(event_loop, events, shutdown));
        Ok((Self { client }, pump))
    }
}

async fn pump_events(
    mut event_loop: EventLoop,
    events: mpsc::Sender<TransportEvent>,
    shutdown: CancellationToken,
) {
    loop {
        let event = tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("MQTT loop cancelled");
                break;
            }
            ev = event_loop.poll() => ev,
        };

        let forwarded = match event {
            Ok(Event::Incoming(Packet::Publish(p))) => {
                let user_properties = p
                    .properties
                    .map(|props| props.user_properties)
                    .unwrap_or_default();
                Some(TransportEvent::Message(inbound_message(
                    &p.topic,
                    &p.payload,
                    p.qos,
                    p.retain,
                    p.pkid,
                    user_properties,
                )))
            }
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                info!(code = ?ack.code, "reconnected");
                Some(TransportEvent::Connected {
                    code: format!("{:?}", ack.code),
                })
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "MQTT poll error (retrying)");
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = tokio::time::sleep(RETRY_DELAY) => {}
                }
                None
            }
        };

        let Some(event) = forwarded else {
            continue;
        };

        // A full channel must not hold up shutdown
        tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("MQTT loop cancelled while forwarding");
                break;
            }
            sent = events.send(event) => {
                if sent.is_err() {
                    debug!("event receiver dropped, stopping MQTT loop");
                    break;
                }
            }
        }
    }
}

/// Build an [`InboundMessage`] from the parts of a Publish packet
pub(crate) fn inbound_message(
    topic: &[u8],
    payload: &[u8],
    qos: QoS,
    retain: bool,
    pkid: u16,
    user_properties: Vec<(String, String)>,
) -> InboundMessage {
    InboundMessage {
        topic: String::from_utf8_lossy(topic).into_owned(),
        payload: payload.to_vec(),
        qos: map_qos(qos),
        retain,
        message_id: pkid,
        user_properties,
    }
}

fn map_qos(q: QoS) -> Qos {
    match q {
        QoS::AtMostOnce => Qos::AtMostOnce,
        QoS::AtLeastOnce => Qos::AtLeastOnce,
        QoS::ExactlyOnce => Qos::ExactlyOnce,
    }
}

fn to_wire_qos(q: Qos) -> QoS {
    match q {
        Qos::AtMostOnce => QoS::AtMostOnce,
        Qos::AtLeastOnce => QoS::AtLeastOnce,
        Qos::ExactlyOnce => QoS::ExactlyOnce,
    }
}

#[async_trait]
impl Transport for MqttTransport {
    async fn subscribe(&self, filter: &str, qos: Qos) -> Result<(), TransportError> {
        self.client
            .subscribe(filter, to_wire_qos(qos))
            .await
            .map_err(|e| TransportError::Subscribe {
                filter: filter.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "mqtt_tests.rs"]
mod tests;
