//! Landing page component
//!
//! Marketing page for the rental subscriptions featuring:
//! - SEO meta tags
//! - Hero section with the seasonal offer countdown
//! - Pricing section with currency, billing period and rental count controls
//! - Plan comparison header
//! - Footer
//!
//! Prices are rendered as placeholders on the server. In the browser the
//! pricing widget loads the catalog and binds the `data-*` markup below.

use leptos::prelude::*;
use leptos_meta::{Link, Meta, Title};

use crate::core::catalog::{Currency, Timeframe};
use crate::core::normalizer::PlanKey;
use crate::ui::countdown::Countdown;
use crate::ui::icon::{Icon, icons};
use crate::ui::nav::SiteNav;
use crate::ui::pricing::PLACEHOLDER;

/// Landing page component with scroll-based animations
#[component]
pub fn LandingPage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        leptos::task::spawn_local(crate::ui::pricing::boot());
    });

    view! {
        <SeoMeta />

        <div class="min-h-screen bg-theme-primary overflow-x-hidden">
            <SiteNav />

            // Hero Section
            <section id="offer" class="min-h-[70vh] flex items-center justify-center relative pt-16">
                <div class="text-center px-4 max-w-4xl mx-auto">
                    <h1 class="text-5xl sm:text-6xl font-bold text-theme-primary mb-6 tracking-tight landing-fade-in-up">
                        "Run every rental from one place"
                    </h1>
                    <p class="text-xl text-theme-secondary max-w-2xl mx-auto mb-10 leading-relaxed landing-fade-in-up landing-delay-200">
                        "Website, channel manager and bookings in a single subscription. Our seasonal offer ends in:"
                    </p>

                    <div class="landing-fade-in-up landing-delay-400">
                        <Countdown />
                    </div>

                    <div class="mt-10 flex justify-center landing-fade-in-up landing-delay-400">
                        <a href="#pricing" class="landing-btn-primary">"See plans"</a>
                    </div>

                    <div class="absolute bottom-8 left-1/2 -translate-x-1/2 animate-bounce">
                        <Icon name=icons::CHEVRON_DOWN class="w-6 h-6 text-theme-tertiary" />
                    </div>
                </div>
            </section>

            <PricingSection />

            <ComparisonHeader />

            <Footer />

            <LandingStyles />

            <ScrollAnimationScript />
        </div>
    }
}

/// SEO Meta tags component using leptos_meta
#[component]
fn SeoMeta() -> impl IntoView {
    view! {
        <Title text="Pricing - Vacation Rental Software" />

        <Meta name="description" content="Compare plans for your vacation rentals. Pay monthly, yearly or every two years and save on longer billing periods." />
        <Meta name="keywords" content="vacation rental software, channel manager, booking website, rental pricing" />

        <Meta property="og:type" content="website" />
        <Meta property="og:title" content="Pricing - Vacation Rental Software" />
        <Meta property="og:description" content="Compare plans for your vacation rentals." />

        <Link rel="canonical" href="/" />
    }
}

/// A plan card as shown in the pricing grid
struct PlanCard {
    key: PlanKey,
    name: &'static str,
    description: &'static str,
    features: &'static [&'static str],
    cta_text: &'static str,
    highlighted: bool,
    discount_yearly: Option<&'static str>,
    discount_biyearly: Option<&'static str>,
}

fn plan_cards() -> [PlanCard; 5] {
    [
        PlanCard {
            key: PlanKey::Slim,
            name: "Slim",
            description: "A booking website for a single property",
            features: &["Booking website", "Payment processing", "Email support"],
            cta_text: "Start free trial",
            highlighted: false,
            discount_yearly: None,
            discount_biyearly: None,
        },
        PlanCard {
            key: PlanKey::StarterFee,
            name: "Starter",
            description: "Pay less upfront with a booking fee",
            features: &["Everything in Slim", "Channel manager", "Booking fee per reservation"],
            cta_text: "Start free trial",
            highlighted: false,
            discount_yearly: None,
            discount_biyearly: None,
        },
        PlanCard {
            key: PlanKey::StarterNoFee,
            name: "Starter (no fee)",
            description: "The Starter plan without booking fees",
            features: &["Everything in Slim", "Channel manager", "No booking fees"],
            cta_text: "Start free trial",
            highlighted: false,
            discount_yearly: None,
            discount_biyearly: None,
        },
        PlanCard {
            key: PlanKey::Pro,
            name: "Professional",
            description: "For growing portfolios",
            features: &["Everything in Starter", "Automated messaging", "Owner reports", "Phone support"],
            cta_text: "Start free trial",
            highlighted: true,
            discount_yearly: None,
            discount_biyearly: None,
        },
        PlanCard {
            key: PlanKey::Ultimate,
            name: "Ultimate",
            description: "Dedicated onboarding and priority service",
            features: &["Everything in Professional", "Dedicated account manager", "Priority support"],
            cta_text: "Talk to us",
            highlighted: false,
            discount_yearly: None,
            discount_biyearly: None,
        },
    ]
}

/// Pricing section component
#[component]
fn PricingSection() -> impl IntoView {
    view! {
        <section id="pricing" class="py-20 px-4 bg-theme-secondary/10">
            <div class="max-w-7xl mx-auto">
                <div class="text-center mb-12 landing-scroll-animate">
                    <h2 class="text-3xl sm:text-4xl font-bold text-theme-primary mb-4">
                        "Plans that grow with your rentals"
                    </h2>
                    <p class="text-lg text-theme-secondary max-w-2xl mx-auto">
                        "Prices are per rental per month. Save more with longer billing periods."
                    </p>
                </div>

                <PricingControls />

                <div class="grid md:grid-cols-2 lg:grid-cols-5 gap-6">
                    {plan_cards().into_iter().map(|card| view! { <PricingCard card=card /> }).collect_view()}
                </div>

                <p class="text-center text-theme-tertiary text-sm mt-8 landing-scroll-animate">
                    "All plans include a 7-day free trial. No credit card required."
                </p>
            </div>
        </section>
    }
}

/// Currency, billing period and rental count switches
#[component]
fn PricingControls() -> impl IntoView {
    let timeframe_label = |timeframe: Timeframe| match timeframe {
        Timeframe::Monthly => "Monthly",
        Timeframe::Yearly => "Yearly",
        Timeframe::BiYearly => "Every 2 years",
    };

    view! {
        <div class="pricing_controls flex flex-col lg:flex-row items-center justify-center gap-6 mb-12">
            <div class="pricing_switch" role="group" aria-label="Currency">
                {Currency::ALL
                    .into_iter()
                    .map(|currency| view! {
                        <a href="#" class="pricing_switch-item" data-change-currency=currency.as_str()>
                            {currency.as_str().to_uppercase()}
                        </a>
                    })
                    .collect_view()}
            </div>

            <div class="pricing_switch" role="group" aria-label="Billing period">
                {Timeframe::ALL
                    .into_iter()
                    .map(|timeframe| view! {
                        <a href="#" class="pricing_switch-item" data-change-timeframe=timeframe.as_str()>
                            {timeframe_label(timeframe)}
                        </a>
                    })
                    .collect_view()}
            </div>

            <div class="pricing_units flex items-center gap-3">
                <span class="text-sm text-theme-secondary">"Rentals"</span>
                <a href="#" class="pricing_unit-button" data-change-unit="minus" aria-label="Fewer rentals">"−"</a>
                <div class="pricing_unit-value tabular-nums" data-unit="">"01"</div>
                <a href="#" class="pricing_unit-button" data-change-unit="plus" aria-label="More rentals">"+"</a>
            </div>
        </div>
    }
}

/// Pricing card component
#[component]
fn PricingCard(card: PlanCard) -> impl IntoView {
    let key = card.key.to_string();
    let card_class = if card.highlighted {
        "pricing_card landing-scroll-animate relative bg-theme-primary p-6 rounded-2xl border-2 border-accent-primary shadow-xl"
    } else {
        "pricing_card landing-scroll-animate bg-theme-primary p-6 rounded-2xl border border-theme hover:border-theme-secondary transition-colors"
    };

    view! {
        <div
            class=card_class
            data-pricing=key.clone()
            data-discount-yearly=card.discount_yearly
            data-discount-biyearly=card.discount_biyearly
        >
            {card.highlighted.then(|| view! {
                <div class="absolute -top-4 left-1/2 -translate-x-1/2 px-4 py-1 bg-accent-primary text-white text-sm font-medium rounded-full">
                    "Most Popular"
                </div>
            })}

            <div class="text-center mb-6">
                <h3 class="text-xl font-bold text-theme-primary mb-2">{card.name}</h3>
                <span class="plan-badge" data-percent="">"20"</span>
                <div id=format!("{}-price", key) class="plan-price flex items-baseline justify-center gap-1">
                    <span data-currency="">"$"</span>
                    <strong class="text-4xl font-bold text-theme-primary">{PLACEHOLDER}</strong>
                </div>
                <div class="plan-original text-sm text-theme-tertiary line-through" data-original=key.clone()>
                    <strong>{PLACEHOLDER}</strong>
                </div>
                <p class="text-sm text-theme-secondary mt-2">{card.description}</p>
            </div>

            <ul class="space-y-3 mb-8">
                {card.features.iter().map(|feature| view! {
                    <li class="flex items-center gap-3">
                        <Icon name=icons::CHECK class="w-5 h-5 text-green-500 flex-shrink-0" />
                        <span class="text-theme-primary">{*feature}</span>
                    </li>
                }).collect_view()}
            </ul>

            <a
                href="#"
                data-cta=""
                class=if card.highlighted {
                    "block w-full text-center py-3 px-6 bg-accent-primary hover:bg-accent-primary-hover text-white font-semibold rounded-xl transition-colors"
                } else {
                    "block w-full text-center py-3 px-6 border-2 border-theme hover:border-accent-primary text-theme-primary font-semibold rounded-xl transition-colors"
                }
            >
                {card.cta_text}
            </a>
        </div>
    }
}

/// Sticky plan header above the feature comparison table
#[component]
fn ComparisonHeader() -> impl IntoView {
    view! {
        <section id="compare" class="py-16 px-4">
            <div class="max-w-7xl mx-auto landing-scroll-animate">
                <h2 class="text-2xl font-bold text-theme-primary mb-8 text-center">"Compare plans"</h2>
                <div class="comparison_header_block grid grid-cols-5 gap-4 sticky top-16 bg-theme-primary py-4 border-b border-theme">
                    {plan_cards().into_iter().map(|card| view! {
                        <div class="text-center" data-price=card.key.to_string()>
                            <div class="font-semibold text-theme-primary">{card.name}</div>
                            <div class="text-theme-secondary">
                                <strong>{PLACEHOLDER}</strong>
                                "/mo"
                            </div>
                        </div>
                    }).collect_view()}
                </div>
            </div>
        </section>
    }
}

/// Footer component
#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="py-12 border-t border-theme bg-theme-primary">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="pt-8 flex flex-col sm:flex-row items-center justify-between gap-4">
                    <span class="text-sm text-theme-tertiary">
                        "Prices exclude VAT. Offer valid until November 28th."
                    </span>
                    <a href="#pricing" class="text-sm text-theme-secondary hover:text-accent-primary transition-colors">
                        "Back to plans"
                    </a>
                </div>
            </div>
        </footer>
    }
}

/// CSS styles for the landing page
#[component]
fn LandingStyles() -> impl IntoView {
    view! {
        <style>
            r#"
            .landing-btn-primary {
                padding: 1rem 2rem;
                font-weight: 600;
                font-size: 1.125rem;
                color: white;
                background-color: #2563eb;
                border-radius: 0.75rem;
                transition: all 0.3s;
                box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1);
                cursor: pointer;
            }
            .landing-btn-primary:hover {
                transform: scale(1.05);
                background-color: #1d4ed8;
            }

            /* Navigation */
            .nav_wrap.is-scrolled {
                box-shadow: 0 4px 12px rgba(0, 0, 0, 0.08);
            }
            @media (max-width: 767px) {
                .nav_menu {
                    display: none;
                }
                .nav_menu.is-nav-open {
                    display: flex;
                    flex-direction: column;
                    position: absolute;
                    top: 4rem;
                    left: 0;
                    right: 0;
                    padding: 1.5rem;
                    background-color: inherit;
                }
            }
            .u-overflow-hidden {
                overflow: hidden;
            }

            /* Pricing controls */
            .pricing_switch {
                display: inline-flex;
                border: 1px solid #d1d5db;
                border-radius: 9999px;
                padding: 0.25rem;
            }
            .pricing_switch-item {
                padding: 0.5rem 1rem;
                border-radius: 9999px;
                font-weight: 500;
            }
            .pricing_switch-item.is-active {
                background-color: #2563eb;
                color: white;
            }
            .pricing_unit-button {
                width: 2rem;
                height: 2rem;
                display: inline-flex;
                align-items: center;
                justify-content: center;
                border: 1px solid #d1d5db;
                border-radius: 9999px;
            }
            .plan-badge {
                display: inline-block;
                padding: 0.125rem 0.5rem;
                font-size: 0.75rem;
                font-weight: 600;
                color: #047857;
                background-color: #d1fae5;
                border-radius: 9999px;
            }
            .plan-badge::after {
                content: "% off";
            }
            .plan-limited-note {
                margin-bottom: 1rem;
                font-size: 0.875rem;
                color: #b45309;
                text-align: center;
            }

            @keyframes landing-fade-in-up {
                from {
                    opacity: 0;
                    transform: translateY(20px);
                }
                to {
                    opacity: 1;
                    transform: translateY(0);
                }
            }

            .landing-fade-in-up {
                animation: landing-fade-in-up 0.6s ease-out forwards;
            }

            .landing-delay-200 {
                animation-delay: 0.2s;
                opacity: 0;
            }

            .landing-delay-400 {
                animation-delay: 0.4s;
                opacity: 0;
            }

            .landing-scroll-animate {
                opacity: 0;
                transform: translateY(30px);
                transition: opacity 0.6s ease-out, transform 0.6s ease-out;
            }

            .landing-scroll-animate.visible {
                opacity: 1;
                transform: translateY(0);
            }
            "#
        </style>
    }
}

/// Script for scroll-triggered animations using IntersectionObserver
#[component]
fn ScrollAnimationScript() -> impl IntoView {
    view! {
        <script>
            r#"
            (function() {
                function initScrollAnimations() {
                    const observer = new IntersectionObserver((entries) => {
                        entries.forEach(entry => {
                            if (entry.isIntersecting) {
                                entry.target.classList.add('visible');
                            }
                        });
                    }, {
                        threshold: 0.1,
                        rootMargin: '0px 0px -50px 0px'
                    });

                    document.querySelectorAll('.landing-scroll-animate').forEach(el => {
                        observer.observe(el);
                    });
                }

                if (document.readyState === 'loading') {
                    document.addEventListener('DOMContentLoaded', initScrollAnimations);
                } else {
                    initScrollAnimations();
                }
            })();
            "#
        </script>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_cover_canonical_plans_in_order() {
        let keys: Vec<PlanKey> = plan_cards().into_iter().map(|card| card.key).collect();
        assert_eq!(keys, PlanKey::CANONICAL.to_vec());
    }

    #[test]
    fn test_single_highlighted_card() {
        let highlighted: Vec<&str> = plan_cards()
            .iter()
            .filter(|card| card.highlighted)
            .map(|card| card.name)
            .collect();
        assert_eq!(highlighted, vec!["Professional"]);
    }
}
