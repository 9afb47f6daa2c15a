//! Plain-text rendering for the command line.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::domain::{
    Account, Block, ResourceUsage, SearchResult, StakePhase, SyncReport, Transaction,
};
use crate::service::{NetworkOverview, SessionSnapshot};

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn usage_line(out: &mut String, label: &str, usage: &ResourceUsage) {
    let _ = writeln!(
        out,
        "{label:<10} {available} available / {limit} ({percent}% used)",
        available = usage.available,
        limit = usage.limit,
        percent = usage.percent_used,
    );
}

pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let Some(address) = &snapshot.address else {
        return "no wallet loaded\n".to_string();
    };

    let _ = writeln!(out, "address    {address}");
    match &snapshot.account {
        Some(account) => {
            let _ = writeln!(out, "balance    {}", account.balance);
        }
        None => {
            let _ = writeln!(out, "balance    unavailable");
        }
    }

    match &snapshot.resources {
        Some(view) => {
            usage_line(&mut out, "energy", &view.energy);
            usage_line(&mut out, "bandwidth", &view.bandwidth);
        }
        None => {
            let _ = writeln!(out, "resources  unavailable");
        }
    }

    if snapshot.frozen.is_empty() {
        let _ = writeln!(out, "frozen     none");
    }
    for record in &snapshot.frozen {
        if record.is_releasable() {
            let _ = writeln!(out, "frozen     {} for {}", record.amount, record.resource);
        } else {
            let _ = writeln!(
                out,
                "frozen     {} for {} (legacy, expires {}, not releasable by unstake)",
                record.amount,
                record.resource,
                timestamp(record.expire_at),
            );
        }
    }

    for token in &snapshot.tokens {
        let _ = writeln!(out, "token      {} ({})", token.formatted(), token.info.name);
    }

    if !matches!(snapshot.phase, StakePhase::Draft) {
        let _ = writeln!(out, "last stake {}", render_phase(&snapshot.phase));
    }
    out
}

pub fn render_phase(phase: &StakePhase) -> String {
    match phase {
        StakePhase::Draft => "draft".to_string(),
        StakePhase::Validated(stake) => format!("validated {} {}", stake.action, stake.amount),
        StakePhase::Submitted { tx_id, .. } => format!("submitted {tx_id}"),
        StakePhase::Confirmed { stake, tx_id } => format!(
            "{} of {} for {} acknowledged, tx {tx_id}",
            stake.action, stake.amount, stake.resource
        ),
        StakePhase::Rejected { tx_id, reason, .. } => format!("rejected {tx_id}: {reason}"),
    }
}

pub fn render_block(block: &Block) -> String {
    format!(
        "#{number} {hash}\n  time     {time}\n  witness  {witness}\n  parent   {parent}\n  txs      {txs}\n",
        number = block.number,
        hash = block.hash,
        time = timestamp(Some(block.timestamp)),
        witness = block.witness,
        parent = block.parent_hash,
        txs = block.tx_count,
    )
}

pub fn render_transaction(transaction: &Transaction) -> String {
    let block = transaction
        .block_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "pending".to_string());
    format!(
        "tx {hash}\n  block    {block}\n  time     {time}\n  result   {result}\n  energy   {energy}\n  bandwidth {bandwidth}\n",
        hash = transaction.hash,
        time = timestamp(transaction.block_timestamp),
        result = transaction.result.as_deref().unwrap_or("-"),
        energy = transaction.energy_used,
        bandwidth = transaction.bandwidth_used,
    )
}

pub fn render_account(account: &Account) -> String {
    let mut out = format!(
        "account {}\n  balance  {}\n  type     {}\n  created  {}\n",
        account.address,
        account.balance,
        account.account_type.as_deref().unwrap_or("Normal"),
        timestamp(account.create_time),
    );
    for record in &account.frozen {
        let _ = writeln!(out, "  frozen   {} for {}", record.amount, record.resource);
    }
    out
}

pub fn render_search(result: &SearchResult) -> String {
    match result {
        SearchResult::Block(block) => render_block(block),
        SearchResult::Transaction(transaction) => render_transaction(transaction),
        SearchResult::Account(account) => render_account(account),
    }
}

pub fn render_sync(report: &SyncReport) -> String {
    match (report.head_number, report.age) {
        (Some(head), Some(age)) => format!(
            "{} (head #{head}, {}s old)",
            report.state,
            age.num_seconds().max(0)
        ),
        _ => report.state.to_string(),
    }
}

pub fn render_network(overview: &NetworkOverview) -> String {
    let node = &overview.node;
    let mut out = format!(
        "connections  {} active / {} passive\ntotal flow   {}\nsync start   #{}\n",
        node.active_connections, node.passive_connections, node.total_flow, node.begin_sync_num,
    );
    for parameter in &overview.parameters {
        let value = parameter
            .value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "  {:<40} {value}", parameter.key);
    }
    out
}
