pub const APP_STYLES: &str = r#"
:root, [data-theme="light"] {
    --app-bg: #f1f5f9;
    --surface-bg: #ffffff;
    --sidebar-bg: #0f172a;
    --sidebar-text: #cbd5e1;
    --sidebar-active: #1e293b;
    --border-color: #e2e8f0;
    --text-primary: #0f172a;
    --text-secondary: #64748b;
    --accent-bg: #2563eb;
    --accent-text: #ffffff;
    --danger-bg: #dc2626;
    --success-bg: #16a34a;
    --warning-bg: #d97706;
    --input-bg: #f8fafc;
}

[data-theme="dark"] {
    --app-bg: #0f172a;
    --surface-bg: #1e293b;
    --sidebar-bg: #020617;
    --sidebar-text: #94a3b8;
    --sidebar-active: #1e293b;
    --border-color: #334155;
    --text-primary: #f8fafc;
    --text-secondary: #94a3b8;
    --accent-bg: #3b82f6;
    --accent-text: #ffffff;
    --danger-bg: #ef4444;
    --success-bg: #22c55e;
    --warning-bg: #f59e0b;
    --input-bg: #0f172a;
}

* { box-sizing: border-box; }

body {
    margin: 0;
    font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    background: var(--app-bg);
    color: var(--text-primary);
}

/* Frame */
.app-frame {
    display: flex;
    min-height: 100vh;
}

.sidebar {
    width: 220px;
    flex-shrink: 0;
    background: var(--sidebar-bg);
    color: var(--sidebar-text);
    display: flex;
    flex-direction: column;
    padding: 1rem 0.5rem;
    gap: 0.125rem;
}

.sidebar-brand {
    font-size: 1.125rem;
    font-weight: 700;
    color: #f8fafc;
    padding: 0.5rem 0.75rem 1rem 0.75rem;
}

.nav-item {
    display: flex;
    align-items: center;
    gap: 0.625rem;
    width: 100%;
    background: transparent;
    border: none;
    color: var(--sidebar-text);
    text-align: start;
    padding: 0.5rem 0.75rem;
    border-radius: 0.375rem;
    font-size: 0.875rem;
    cursor: pointer;
}

.nav-item:hover { background: var(--sidebar-active); }

.nav-item.active {
    background: var(--sidebar-active);
    color: #f8fafc;
    font-weight: 600;
}

.nav-badge {
    margin-inline-start: auto;
    background: var(--danger-bg);
    color: white;
    border-radius: 999px;
    font-size: 0.6875rem;
    padding: 0.0625rem 0.4375rem;
}

.main-column {
    flex: 1;
    display: flex;
    flex-direction: column;
    min-width: 0;
}

.app-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    gap: 1rem;
    padding: 0.75rem 1.5rem;
    background: var(--surface-bg);
    border-bottom: 1px solid var(--border-color);
}

.screen-body {
    flex: 1;
    padding: 1.5rem;
    overflow: auto;
}

/* Controls */
.btn {
    background: transparent;
    border: 1px solid var(--border-color);
    color: var(--text-secondary);
    cursor: pointer;
    padding: 0.375rem 0.75rem;
    border-radius: 0.375rem;
    font-size: 0.875rem;
}

.btn:disabled { opacity: 0.5; cursor: default; }

.btn-primary {
    background: var(--accent-bg);
    border: none;
    color: var(--accent-text);
}

.btn-danger {
    background: var(--danger-bg);
    border: none;
    color: white;
}

.btn-link {
    background: transparent;
    border: none;
    color: var(--accent-bg);
    cursor: pointer;
    padding: 0.25rem 0.5rem;
    font-size: 0.875rem;
}

.input, .select {
    padding: 0.5rem 0.75rem;
    background: var(--input-bg);
    color: var(--text-primary);
    border: 1px solid var(--border-color);
    border-radius: 0.375rem;
    font-size: 0.875rem;
    width: 100%;
}

/* Cards and tables */
.card {
    background: var(--surface-bg);
    border: 1px solid var(--border-color);
    border-radius: 0.5rem;
    padding: 1rem;
}

.screen-title {
    margin: 0 0 1rem 0;
    font-size: 1.25rem;
}

.toolbar {
    display: flex;
    align-items: center;
    justify-content: space-between;
    gap: 0.75rem;
    margin-bottom: 1rem;
}

.data-table {
    width: 100%;
    border-collapse: collapse;
    background: var(--surface-bg);
    border: 1px solid var(--border-color);
    border-radius: 0.5rem;
    overflow: hidden;
}

.data-table th {
    text-align: start;
    font-size: 0.75rem;
    text-transform: uppercase;
    letter-spacing: 0.05em;
    color: var(--text-secondary);
    padding: 0.625rem 0.875rem;
    border-bottom: 1px solid var(--border-color);
}

.data-table td {
    padding: 0.625rem 0.875rem;
    font-size: 0.875rem;
    border-bottom: 1px solid var(--border-color);
}

.data-table tr:last-child td { border-bottom: none; }

.row-muted { color: var(--text-secondary); }

.pill {
    display: inline-block;
    border-radius: 999px;
    padding: 0.125rem 0.625rem;
    font-size: 0.75rem;
    font-weight: 600;
}

.pill-green { background: color-mix(in srgb, var(--success-bg) 15%, transparent); color: var(--success-bg); }
.pill-red { background: color-mix(in srgb, var(--danger-bg) 15%, transparent); color: var(--danger-bg); }
.pill-amber { background: color-mix(in srgb, var(--warning-bg) 15%, transparent); color: var(--warning-bg); }
.pill-gray { background: color-mix(in srgb, var(--text-secondary) 15%, transparent); color: var(--text-secondary); }

/* Error banner */
.error-banner {
    display: flex;
    align-items: center;
    justify-content: space-between;
    gap: 0.75rem;
    background: color-mix(in srgb, var(--danger-bg) 12%, transparent);
    border: 1px solid var(--danger-bg);
    color: var(--danger-bg);
    border-radius: 0.375rem;
    padding: 0.5rem 0.75rem;
    font-size: 0.875rem;
    margin-bottom: 0.75rem;
}

/* Dialogs */
.dialog-backdrop {
    position: fixed;
    top: 0; left: 0; right: 0; bottom: 0;
    background: rgba(0, 0, 0, 0.55);
    display: flex;
    align-items: center;
    justify-content: center;
    z-index: 1000;
}

.dialog-box {
    background: var(--surface-bg);
    border: 1px solid var(--border-color);
    border-radius: 0.5rem;
    padding: 1.5rem;
    min-width: 380px;
    max-width: 90vw;
    max-height: 85vh;
    overflow: auto;
}

.dialog-title {
    margin: 0 0 1rem 0;
    font-size: 1.125rem;
}

.dialog-footer {
    display: flex;
    justify-content: flex-end;
    gap: 0.5rem;
    margin-top: 1rem;
}

.field {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
    margin-bottom: 0.75rem;
}

.field-label {
    font-size: 0.8125rem;
    color: var(--text-secondary);
}

/* Toasts */
.toast-stack {
    position: fixed;
    bottom: 1rem;
    inset-inline-end: 1rem;
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    z-index: 2000;
}

.toast {
    border-radius: 0.375rem;
    padding: 0.625rem 1rem;
    font-size: 0.875rem;
    color: white;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.25);
    cursor: pointer;
    max-width: 340px;
}

.toast-success { background: var(--success-bg); }
.toast-error { background: var(--danger-bg); }
.toast-info { background: var(--accent-bg); }

/* Messaging */
.thread-list {
    width: 280px;
    flex-shrink: 0;
    border-inline-end: 1px solid var(--border-color);
    overflow: auto;
}

.thread-item {
    width: 100%;
    text-align: start;
    background: transparent;
    border: none;
    border-bottom: 1px solid var(--border-color);
    padding: 0.75rem;
    cursor: pointer;
    color: var(--text-primary);
}

.thread-item:hover { background: var(--input-bg); }
.thread-item.selected { background: var(--input-bg); }

.bubble {
    max-width: 70%;
    border-radius: 0.75rem;
    padding: 0.5rem 0.75rem;
    font-size: 0.875rem;
    margin-bottom: 0.5rem;
}

.bubble-own {
    background: var(--accent-bg);
    color: var(--accent-text);
    margin-inline-start: auto;
}

.bubble-other {
    background: var(--input-bg);
    border: 1px solid var(--border-color);
}

.pending-badge {
    font-size: 0.6875rem;
    opacity: 0.8;
}

/* Attendance */
.status-cell button {
    margin-inline-end: 0.25rem;
}

.status-btn {
    background: transparent;
    border: 1px solid var(--border-color);
    color: var(--text-secondary);
    cursor: pointer;
    border-radius: 999px;
    padding: 0.125rem 0.625rem;
    font-size: 0.75rem;
}

.status-btn.selected {
    background: var(--accent-bg);
    border-color: var(--accent-bg);
    color: var(--accent-text);
}

.save-state {
    font-size: 0.8125rem;
    color: var(--text-secondary);
}

.empty-state {
    text-align: center;
    color: var(--text-secondary);
    padding: 3rem 1rem;
    font-size: 0.875rem;
}

/* Overview */
.stat-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(180px, 1fr));
    gap: 1rem;
    margin-bottom: 1.5rem;
}

.stat-value {
    font-size: 1.75rem;
    font-weight: 700;
}

.stat-label {
    font-size: 0.8125rem;
    color: var(--text-secondary);
}
"#;
