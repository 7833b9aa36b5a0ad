// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::registry::DnsblEntry;

// Some zones appear under more than one name; each name is checked on its own.
static DNSBLS: &[(&str, &str)] = &[
    ("Composite Blocking", "cbl.abuseat.org"),
    ("Barracuda Reputation Block", "b.barracudacentral.org"),
    ("DNSBL SPFBL", "dnsbl.spfbl.net"),
    ("URIBL red", "red.uribl.com"),
    ("URIBL grey", "grey.uribl.com"),
    ("URIBL black", "black.uribl.com"),
    ("URIBL multi", "multi.uribl.com"),
    ("DroneBL", "dnsbl.dronebl.org"),
    ("abuse.ro RBL", "rbl.abuse.ro"),
    ("anonmails.de DNSBL", "spam.dnsbl.anonmails.de"),
    ("JIPPG`s Relay Blackhole", "mail-abuse.blacklist.jippg.org"),
    ("BlockedServers", "rbl.blockedservers.com"),
    ("BlockList.de", "bl.blocklist.de"),
    ("Blog Spam Blacklist", "list.blogspambl.com"),
    ("Calivent DNSBL", "dnsbl.calivent.com.pe"),
    ("IBM DNS Blacklist", "dnsbl.cobion.com"),
    ("Bogon", "bogons.cymru.com"),
    ("Torexit", "torexit.dan.me.uk"),
    ("Servicios RBL", "rbl.dns-servicios.com"),
    ("DrMX", "bl.drmx.org"),
    ("EFnet - TOR", "rbl.efnetrbl.org"),
    ("SpamSources RBL", "spamsources.fabel.dk"),
    ("ZapBL DNSRBL", "dnsbl.zapbl.net"),
    ("Blog Spam Blocklist", "bsb.empty.us"),
    ("Spam Lookup RBL", "bsb.spamlookup.net"),
    ("Spam Eating Monkey", "fresh.spameatingmonkey.net"),
    ("SURBL multi", "multi.surbl.org"),
    ("Woodys SMTP Blacklist URIBL", "uri.blacklist.woody.ch"),
    ("Dynip Rothen List", "dynip.rothen.com"),
    ("ZoneEdit deny DNS", "ban.zebl.zoneedit.com"),
    ("The Day Old Bread List", "dob.sibl.support-intelligence.net"),
    ("Rymshos RHSBL", "rhsbl.rymsho.ru"),
    ("abuse.ro URI RBL", "uribl.abuse.ro"),
    ("Sorbs DNSBL", "dnsbl.sorbs.net"),
    ("Zen DNSBL", "zen.spamhaus.org"),
    ("Spamcop BL", "bl.spamcop.net"),
    ("UceProtect DNSBL", "dnsbl-1.uceprotect.net"),
    ("Surriel PSBL", "psbl.surriel.com"),
    ("SpamHaus DNSBL", "dnsbl.sbl.spamhaus.org"),
    ("SpamHaus PBL", "pbl.spamhaus.org"),
    ("SpamHaus SBL", "sbl-xbl.spamhaus.org"),
    ("SpamHaus XBL", "xbl.spamhaus.org"),
    ("SORBS Spam", "spam.dnsbl.sorbs.net"),
    ("SpamRATS", "zen.spamrats.com"),
    ("SORBS Escalations", "escalations.dnsbl.sorbs.net"),
    ("SORBS Safe", "safe.dnsbl.sorbs.net"),
    ("UCEPROTECT Level 1", "dnsbl-1.uceprotect.net"),
    ("UCEPROTECT Level 2", "dnsbl-2.uceprotect.net"),
    ("UCEPROTECT Level 3", "dnsbl-3.uceprotect.net"),
    ("UCEPROTECT Level 4", "dnsbl-4.uceprotect.net"),
    ("Team Cymru", "bogons.cymru.com"),
    ("Backscatterer", "ips.backscatterer.org"),
    ("Abuseat", "truncate.gbudb.net"),
    ("Invaluement", "ubl.unsubscore.com"),
    ("Mailspike", "bl.mailspike.net"),
    ("Sorbs Zombie", "zombie.dnsbl.sorbs.net"),
    ("Mail Spike", "z.mailspike.net"),
    ("Worm RBL", "wormrbl.imp.ch"),
    ("RBL.jp", "virus.rbl.jp"),
    ("Lash Hack UBL", "ubl.lashback.com"),
    ("Abuse.ch", "spam.abuse.ch"),
    ("Spfbl DNSBL", "dnsbl.spfbl.net"),
    ("S5h ALL", "all.s5h.net"),
    ("Inps DNSBL", "dnsbl.inps.de"),
    ("Korea Services", "korea.services.net"),
    ("0Spam Project", "bl.0spam.org"),
    ("0spam DBL", "url.0spam.org"),
    ("Anonmails", "spam.dnsbl.anonmails.de"),
    ("JustSpam", "dnsbl.justspam.org"),
];

pub fn dnsbl_entries() -> impl Iterator<Item = DnsblEntry> {
    DNSBLS.iter().map(|(name, domain)| DnsblEntry::new(*name, *domain))
}
